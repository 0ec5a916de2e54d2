use mastery_api::{ApiError, Client, CredentialStore, MemoryCredentialStore, Request};
use std::sync::Arc;

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let store = Arc::new(MemoryCredentialStore::new());
    let client = Client::new("http://localhost:8000", store.clone());

    let login = client
        .send_anonymous(Request::auth().login("parent", "password"))
        .await?;
    if let (Some(access), Some(refresh)) = (login.access, login.refresh) {
        store.store_pair(&access, &refresh)?;
    }

    let roster = client.send(Request::parents().children()).await?;
    for child in &roster.children {
        println!("{}: {}", child.display_name(), child.mastery);
    }
    Ok(())
}
