#[cfg(test)]
mod tests {
    use apiwrap::Request as ApiRequest;
    use apiwrap_backend_reqwest::ReqwestDriver;

    use crate::*;

    const BODY: &str = "pong";

    fn pong_fixture(path: &str) -> RouteGuard {
        crate::route(path, |_| async move {
            let res = Response::new(Full::new(Bytes::from(BODY)));
            (res, Ok(()))
        })
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn test_blocking_inside_tokio_task() {
        const PATH: &str = "scenarios/runtime_compat/blocking_in_task";
        let _handle = pong_fixture(PATH);
        let client = crate::init_builder_blocking()
            .unwrap()
            .build_blocking(ReqwestDriver::new());
        let text = RT
            .block_on(RT.spawn(async move {
                client
                    .send(ApiRequest::get(PATH).build().unwrap())
                    .map(|res| res.text())
            }))
            .unwrap()
            .unwrap();
        assert_eq!(text, BODY);
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn test_blocking_driver_shared_across_threads() {
        const PATH: &str = "scenarios/runtime_compat/shared_driver";
        let _handle = pong_fixture(PATH);
        let client = crate::init_builder_blocking()
            .unwrap()
            .build_blocking(ReqwestDriver::new());
        std::thread::scope(|s| {
            let workers: Vec<_> = (0..4)
                .map(|_| s.spawn(|| client.send(ApiRequest::get(PATH).build().unwrap())))
                .collect();
            for worker in workers {
                assert_eq!(worker.join().unwrap().unwrap().text(), BODY);
            }
        });
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_async_on_fresh_runtime() {
        const PATH: &str = "scenarios/runtime_compat/async_fresh_runtime";
        let _handle = pong_fixture(PATH);
        let builder = RT.block_on(crate::init_builder()).unwrap();
        let client = builder.build_async(ReqwestDriver::new());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let text = runtime.block_on(async {
            client
                .send(ApiRequest::get(PATH).build().unwrap())
                .await
                .unwrap()
                .text()
        });
        assert_eq!(text, BODY);
    }
}
