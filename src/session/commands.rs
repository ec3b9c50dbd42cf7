use crate::{models::User, session::SessionState, AppState};

const REGISTER_FAILED: &str = "Could not create the account.";
const LOGIN_FAILED: &str = "Could not sign in.";

pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, String> {
    let result = state.session.register(name, email, password).await;
    let user = state.report(result, REGISTER_FAILED).await?;
    state
        .notifier
        .success("Account created", "You can now sign in.");
    Ok(user)
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<User, String> {
    let result = state.session.login(email, password).await;
    state.report(result, LOGIN_FAILED).await
}

pub async fn logout(state: &AppState) -> Result<(), String> {
    state.session.logout().await;
    Ok(())
}

pub async fn get_session(state: &AppState) -> Result<SessionState, String> {
    Ok(state.session.snapshot().await)
}
