#[cfg(test)]
mod tests {
    use apiwrap::Request as ApiRequest;
    use hyper::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
    use hyper::StatusCode;

    use crate::*;

    #[test]
    fn test_get_text() {
        const PATH: &str = "responses/get_text";
        const BODY: &str = r#"{"message": "Hello, world!"}"#;
        let _handle = crate::route(PATH, |_| async move {
            let res = Response::new(Full::new(Bytes::from(BODY)));
            (res, Ok(()))
        });
        for response in send_both(|| ApiRequest::get(PATH).build().unwrap()) {
            assert_eq!(response.status_code, 200);
            assert!(response.is_success());
            assert_eq!(response.encoding, "utf-8");
            assert_eq!(response.text(), BODY);
            assert!(response.url.ends_with("/responses/get_text"));
            assert_eq!(response.request.url, response.url);
        }
    }

    #[test]
    fn test_unsuccessful_status_is_not_an_error() {
        const PATH: &str = "responses/unsuccessful_status";
        let _handle = crate::route(PATH, |_| async move {
            let mut res = Response::new(Full::new(Bytes::from_static(b"gone")));
            *res.status_mut() = StatusCode::GONE;
            (res, Ok(()))
        });
        for response in send_both(|| ApiRequest::delete(PATH).build().unwrap()) {
            assert_eq!(response.status_code, 410);
            assert!(!response.is_success());
            assert_eq!(response.text(), "gone");
        }
    }

    #[test]
    fn test_headers_and_cookies() {
        const PATH: &str = "responses/headers_and_cookies";
        let _handle = crate::route(PATH, |_| async move {
            let res = Response::builder()
                .header("X-Rate-Limit", "42")
                .header(SET_COOKIE, "session=s3cr3t; Path=/; HttpOnly")
                .header(SET_COOKIE, "theme=dark")
                .body(Full::new(Bytes::new()))
                .unwrap();
            (res, Ok(()))
        });
        for response in send_both(|| ApiRequest::get(PATH).build().unwrap()) {
            assert_eq!(response.headers.get("x-rate-limit"), Some("42"));
            assert_eq!(response.cookie("session"), Some("s3cr3t"));
            assert_eq!(response.cookie("theme"), Some("dark"));
            assert_eq!(response.cookie("missing"), None);
        }
    }

    #[test]
    fn test_text_uses_declared_charset() {
        const PATH: &str = "responses/latin1";
        let _handle = crate::route(PATH, |_| async move {
            let res = Response::builder()
                .header(CONTENT_TYPE, "text/plain; charset=ISO-8859-1")
                .body(Full::new(Bytes::from_static(b"caf\xe9")))
                .unwrap();
            (res, Ok(()))
        });
        for response in send_both(|| ApiRequest::get(PATH).build().unwrap()) {
            assert_eq!(response.encoding, "iso-8859-1");
            assert_eq!(response.content, b"caf\xe9");
            assert_eq!(response.text(), "café");
        }
    }

    #[test]
    fn test_redirect_is_followed() {
        const FROM: &str = "responses/redirect_from";
        const TO: &str = "responses/redirect_to";
        let _from = crate::route(FROM, |_| async move {
            let res = Response::builder()
                .status(StatusCode::FOUND)
                .header(LOCATION, format!("/{TO}"))
                .body(Full::new(Bytes::new()))
                .unwrap();
            (res, Ok(()))
        });
        let _to = crate::route(TO, |_| async move {
            let res = Response::new(Full::new(Bytes::from_static(b"landed")));
            (res, Ok(()))
        });
        for response in send_both(|| ApiRequest::get(FROM).build().unwrap()) {
            assert_eq!(response.status_code, 200);
            assert!(response.url.ends_with(TO));
            assert!(response.request.url.ends_with(FROM));
            assert_eq!(response.text(), "landed");
        }
    }

    #[test]
    fn test_head_has_no_body() {
        const PATH: &str = "responses/head";
        let _handle = crate::route(PATH, |req| async move {
            let res = Response::builder()
                .header("X-Exists", "yes")
                .body(Full::new(Bytes::new()))
                .unwrap();
            (res, (req.method() == hyper::Method::HEAD).then_some(()).ok_or(req))
        });
        for response in send_both(|| ApiRequest::head(PATH).build().unwrap()) {
            assert_eq!(response.status_code, 200);
            assert_eq!(response.headers.get("x-exists"), Some("yes"));
            assert!(response.content.is_empty());
        }
    }
}
