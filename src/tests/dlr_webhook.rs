#[cfg(test)]
mod test {
    use crate::server::dlr;
    use crate::tests::common::{build_reqwest_client, spawn_axum};
    use serde_json::json;

    #[tokio::test]
    async fn any_delivery_report_is_acknowledged() {
        let (handle, addr) = spawn_axum(dlr::router()).await;
        let client = build_reqwest_client();
        let url = format!("http://{}/whatsapp/dlr", addr);

        let response = client
            .post(&url)
            .json(&json!({"GUID": "ke3RG...", "STATUS": "DELIVRD"}))
            .send()
            .await
            .expect("webhook reachable");
        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.expect("json body");
        assert_eq!(body, json!({"status": "success"}));

        // non-JSON payloads are acknowledged too
        let response = client
            .post(&url)
            .body("GUID=ke3RG&STATUS=EXPIRED")
            .send()
            .await
            .expect("webhook reachable");
        assert!(response.status().is_success());

        handle.abort();
    }
}
