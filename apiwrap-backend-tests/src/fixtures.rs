mod client_options {
    mod request_timeout;
    mod tls;
}
mod errors {
    mod connection;
    mod invalid_json;
}
mod responses;
mod scenarios {
    mod middleware_order;
    mod runtime_compat;
    mod token_auth;
}
