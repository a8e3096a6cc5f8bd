#[cfg(test)]
mod tests {
    use apiwrap::{Error, Request as ApiRequest};
    use apiwrap_backend_reqwest::ReqwestDriver;

    use crate::*;

    fn unused_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/refused")
    }

    #[test]
    fn test_connection_refused() {
        let url = unused_port_url();

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking(ReqwestDriver::new());
            let err = client
                .send(ApiRequest::get(&url).build().unwrap())
                .unwrap_err();
            assert!(matches!(err, Error::ConnectionFailed(_)), "{err:?}");
            assert!(err.is_driver_error());
        }
        #[cfg(feature = "async")]
        {
            let err = RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async(ReqwestDriver::new());
                client
                    .send(ApiRequest::get(&url).build().unwrap())
                    .await
                    .unwrap_err()
            });
            assert!(matches!(err, Error::ConnectionFailed(_)), "{err:?}");
        }
    }

    #[test]
    fn test_invalid_url() {
        const URL: &str = "http://exa mple.com/";

        #[cfg(feature = "blocking")]
        {
            let client = crate::init_builder_blocking()
                .unwrap()
                .build_blocking(ReqwestDriver::new());
            let err = client
                .send(ApiRequest::get(URL).build().unwrap())
                .unwrap_err();
            assert!(matches!(&err, Error::InvalidUrl(url) if url == URL), "{err:?}");
        }
        #[cfg(feature = "async")]
        {
            let err = RT.block_on(async {
                let client = crate::init_builder()
                    .await
                    .unwrap()
                    .build_async(ReqwestDriver::new());
                client
                    .send(ApiRequest::get(URL).build().unwrap())
                    .await
                    .unwrap_err()
            });
            assert!(matches!(&err, Error::InvalidUrl(url) if url == URL), "{err:?}");
        }
    }
}
