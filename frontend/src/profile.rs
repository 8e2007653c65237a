//! 用户资料模块
//!
//! 邮箱只读展示，从不提交修改。

use dishdash_shared::protocol::{ChangePasswordRequest, GetProfileRequest, UpdateProfileRequest};

use crate::auth;
use crate::error::{AppError, AppResult};
use crate::platform::{AppContext, NoticeKind};

/// 资料表单的内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub address: String,
}

pub async fn load_user_profile(ctx: &AppContext) {
    match ctx.api.send(&GetProfileRequest).await {
        Ok(Some(profile)) => ctx.screen.fill_profile(ProfileForm {
            email: profile.email.unwrap_or_default(),
            name: profile.name.unwrap_or_default(),
            last_name: profile.last_name.unwrap_or_default(),
            address: profile.address.unwrap_or_default(),
        }),
        Ok(None) => ctx.notifier.notify(
            NoticeKind::Error,
            "Failed to load profile information. Incomplete profile data.",
        ),
        Err(e) => {
            log_error!("[Profile] Error loading profile: {}", e);
            if let Some(msg) = e.user_message("Failed to load profile information.") {
                ctx.notifier.notify(NoticeKind::Error, &msg);
            }
        }
    }
}

/// 提交姓名与地址，成功后重新加载
pub async fn update_profile(ctx: &AppContext, name: &str, last_name: &str, address: &str) -> bool {
    let req = UpdateProfileRequest {
        name: name.to_string(),
        last_name: last_name.to_string(),
        address: address.to_string(),
    };

    match ctx.api.send(&req).await {
        Ok(ack) if ack.success => {
            ctx.notifier
                .notify(NoticeKind::Success, "Profile updated successfully!");
            load_user_profile(ctx).await;
            true
        }
        Ok(ack) => {
            ctx.notifier
                .notify(NoticeKind::Error, ack.message_or("Error updating profile"));
            false
        }
        Err(e) => {
            log_error!("[Profile] Error updating profile: {}", e);
            if let Some(msg) = e.user_message("Unknown error") {
                ctx.notifier
                    .notify(NoticeKind::Error, &format!("Error updating profile: {}", msg));
            }
            false
        }
    }
}

/// 本地校验：确认不一致或长度不足时直接失败
pub fn validate_password_change(new_password: &str, confirm: &str, min_len: usize) -> AppResult<()> {
    if new_password != confirm {
        return Err(AppError::validation(
            "New password and confirmation do not match.",
        ));
    }
    if new_password.chars().count() < min_len {
        return Err(AppError::validation(format!(
            "New password must be at least {} characters long",
            min_len
        )));
    }
    Ok(())
}

/// 修改密码
///
/// 本地校验通过后才发请求。成功后延迟强制登出，旧 token 不再可用。
pub async fn change_password(ctx: &AppContext, current: &str, new_password: &str, confirm: &str) -> bool {
    if let Err(e) = validate_password_change(new_password, confirm, ctx.config.min_password_len) {
        ctx.notifier.alert(NoticeKind::Error, "Error", e.message()).await;
        return false;
    }

    let req = ChangePasswordRequest {
        current_password: current.to_string(),
        new_password: new_password.to_string(),
    };

    match ctx.api.send(&req).await {
        Ok(ack) if ack.success => {
            ctx.notifier.notify(
                NoticeKind::Success,
                "Password changed successfully! Please log in again.",
            );
            ctx.delay.sleep(ctx.config.logout_delay).await;
            auth::logout(ctx);
            true
        }
        Ok(ack) => {
            ctx.notifier
                .notify(NoticeKind::Error, ack.message_or("Error changing password."));
            false
        }
        Err(e) => {
            log_error!("[Profile] Error changing password: {}", e);
            if let Some(msg) = e.user_message("Unknown error") {
                ctx.notifier
                    .notify(NoticeKind::Error, &format!("Error changing password: {}", msg));
            }
            false
        }
    }
}
