use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;
use identity_service::domain::account::errors::AuthError;
use identity_service::domain::account::models::Account;
use identity_service::domain::account::models::AccountId;
use identity_service::domain::account::models::EmailAddress;
use identity_service::domain::account::models::NewAccount;
use identity_service::domain::account::ports::AccountRepository;
use identity_service::domain::account::service::AuthService;
use identity_service::inbound::http::router::create_router;

pub const TEST_TOKEN_SECRET: &[u8] = b"test-secret-key-for-token-signing-32b!";
pub const TEST_TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Account store backing the API tests; uniqueness check and insert happen
/// under one lock, matching the atomicity the real store guarantees.
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Flip the active flag directly, standing in for the account-management
    /// operations the service does not expose.
    pub fn set_active(&self, email: &str, active: bool) {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.iter_mut().find(|a| a.email.as_str() == email) {
            account.is_active = active;
        }
    }

    /// Drop an account entirely, simulating external deletion after a token
    /// was issued.
    pub fn remove(&self, email: &str) {
        self.accounts
            .lock()
            .unwrap()
            .retain(|a| a.email.as_str() != email);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts
            .iter()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AuthError::DuplicateEmail(
                account.email.as_str().to_string(),
            ));
        }

        let created = Account {
            id: AccountId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
            is_active: true,
            is_superuser: false,
        };
        accounts.push(created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.email.as_str() == email.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AuthError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Test application running the real router on a random port.
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryAccountRepository>,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());
        let service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            PasswordHasher::new(),
            TokenIssuer::new(
                TEST_TOKEN_SECRET,
                Duration::minutes(TEST_TOKEN_LIFETIME_MINUTES),
            ),
        ));

        let router = create_router(service, Arc::clone(&repository), "*");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            // Same secret as the server, for crafting tokens in tests.
            token_issuer: TokenIssuer::new(
                TEST_TOKEN_SECRET,
                Duration::minutes(TEST_TOKEN_LIFETIME_MINUTES),
            ),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account and return the response
    pub async fn register(&self, email: &str, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Login and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Login and extract the access token, asserting success
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}
