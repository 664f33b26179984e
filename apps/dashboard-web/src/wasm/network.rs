use super::*;

    pub(super) struct HttpDashboardApi {
        balance_path: String,
        transactions_path: String,
    }

    impl HttpDashboardApi {
        pub(super) fn new(config: &SyncConfig) -> Self {
            Self {
                balance_path: config.balance_path.clone(),
                transactions_path: config.transactions_path.clone(),
            }
        }
    }

    #[async_trait(?Send)]
    impl DashboardApi for HttpDashboardApi {
        async fn fetch_balance(&self) -> Result<BalanceResponse, FetchError> {
            get_json(&self.balance_path).await
        }

        async fn fetch_transactions(&self) -> Result<TransactionBatch, FetchError> {
            get_json(&self.transactions_path).await
        }
    }

    pub(super) async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
        let response = Request::get(path)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(map_network_error)?;
        decode_json_response(response).await
    }

    pub(super) fn map_network_error(error: gloo_net::Error) -> FetchError {
        FetchError::network(error.to_string())
    }

    pub(super) async fn decode_json_response<T: DeserializeOwned>(
        response: gloo_net::http::Response,
    ) -> Result<T, FetchError> {
        let status = response.status();
        let raw = response.text().await.map_err(|error| FetchError::Read {
            message: error.to_string(),
        })?;
        decode_json_body(status, &raw)
    }
