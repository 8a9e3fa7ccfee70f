use docbook_api::Application;
use docbook_infra::{setup_context, Config};
use docbook_sdk::{DocbookSDK, SignUpInput, UserDTO};

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, DocbookSDK) {
    spawn_app_with(|_| ()).await
}

/// Like `spawn_app` with changes to the default `Config`
pub async fn spawn_app_with<F: FnOnce(&mut Config)>(configure: F) -> (TestApp, DocbookSDK) {
    let mut ctx = setup_context().await.expect("Failed to setup context");
    configure(&mut ctx.config);
    ctx.config.port = 0; // Random port

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = DocbookSDK::new(address.clone());
    (TestApp { config, address }, sdk)
}

impl TestApp {
    /// Signs up a new user and returns a client authenticated as it
    pub async fn signed_in_user(&self) -> (UserDTO, DocbookSDK) {
        let (user, token) = self.sign_up(None).await;
        (user, DocbookSDK::with_token(self.address.clone(), token))
    }

    pub async fn signed_in_admin(&self) -> (UserDTO, DocbookSDK) {
        let code = self.config.admin_signup_secret_code.clone();
        let (admin, token) = self.sign_up(Some(code)).await;
        (admin, DocbookSDK::with_token(self.address.clone(), token))
    }

    /// Signs up a new user and returns it with its session token
    pub async fn sign_up(&self, admin_secret_code: Option<String>) -> (UserDTO, String) {
        let res = DocbookSDK::new(self.address.clone())
            .auth
            .sign_up(SignUpInput {
                full_name: "Test User".into(),
                email: super::utils::unique_email(),
                password: super::utils::PASSWORD.into(),
                phone: None,
                admin_secret_code,
            })
            .await
            .expect("Expected to sign up");
        (res.user, res.token)
    }
}
