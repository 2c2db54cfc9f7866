use crate::app::state::AppState;
use crate::domain::types::Role;

use super::common::{map_api_error, to_json};

// ==========================================
// 登录与凭证命令
// ==========================================

pub async fn login(
    state: &AppState,
    role: Role,
    username: &str,
    password: &str,
) -> Result<String, String> {
    state
        .auth_api
        .login(role, username, password)
        .await
        .map_err(map_api_error)?;
    Ok(format!("Logged in as {}", role))
}

pub fn logout(state: &AppState, role: Role) -> Result<String, String> {
    let removed = state.auth_api.logout(role).map_err(map_api_error)?;
    Ok(if removed {
        format!("Logged out ({})", role)
    } else {
        format!("No stored token for {}", role)
    })
}

/// 当前持有凭证的角色
pub fn whoami(state: &AppState, json: bool) -> Result<String, String> {
    let status = state.auth_api.status().map_err(map_api_error)?;
    if json {
        return to_json(&status);
    }
    let yes_no = |b: bool| if b { "yes" } else { "no" };
    Ok(format!(
        "user: {}\nadmin: {}",
        yes_no(status.user),
        yes_no(status.admin)
    ))
}

pub async fn forgot_password(state: &AppState, role: Role, username: &str) -> Result<String, String> {
    let message = state
        .auth_api
        .forgot_password(role, username)
        .await
        .map_err(map_api_error)?;
    Ok(if message.is_empty() {
        "Reset link requested".to_string()
    } else {
        message
    })
}

pub async fn reset_password(
    state: &AppState,
    role: Role,
    token: &str,
    password: &str,
    confirm: &str,
) -> Result<String, String> {
    state
        .auth_api
        .reset_password(role, token, password, confirm)
        .await
        .map_err(map_api_error)?;
    Ok("Password has been reset".to_string())
}
