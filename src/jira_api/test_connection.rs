use anyhow::Result;
use serde::Deserialize;

use super::{client::check_status, Jira};

#[derive(Deserialize)]
struct Myself {
    #[serde(rename = "displayName")]
    display_name: String,
}

/// Check that the url and credentials work. Returns the display name of the logged in user.
pub async fn test_connection(client: &Jira) -> Result<String> {
    log::info!("Requesting current user...");

    let url = client.endpoint(&["myself"])?;
    let response = client.client().get(url).send().await?;
    let myself = check_status(response).await?.json::<Myself>().await?;

    log::info!("Requesting current user...done");
    Ok(myself.display_name)
}

#[cfg(test)]
mod tests {
    use crate::jira_api::testutils::serve_once;

    use super::*;

    #[tokio::test]
    async fn returns_display_name() {
        let (jira, server) = serve_once(
            "200 OK",
            r#"{"accountId":"abc","displayName":"Some One","active":true}"#,
        )
        .await;

        assert_eq!("Some One", test_connection(&jira).await.unwrap());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn bad_credentials() {
        let (jira, server) = serve_once("401 Unauthorized", "").await;

        assert!(test_connection(&jira).await.is_err());
        server.await.unwrap();
    }
}
