/// 사용자 관련 커맨드 처리
/// 1. 회원 가입 / 로그인
/// 2. 이메일 인증 / 비밀번호 재설정
/// 3. 계정 정지 / 프로필 관리
// region:    --- Imports
use super::model::{User, UserProfile};
use super::queries;
use crate::database::DatabaseManager;
use crate::security;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Commands

/// 회원 가입 명령
#[derive(Debug, Deserialize)]
pub struct RegisterUserCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
}

/// 로그인 명령
#[derive(Debug, Deserialize)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// 이메일 인증 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyEmailCommand {
    pub token: String,
}

/// 비밀번호 재설정 요청 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct ForgotPasswordCommand {
    pub email: String,
}

/// 비밀번호 재설정 명령
#[derive(Debug, Deserialize)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub new_password: String,
}

/// 비밀번호 변경 명령
#[derive(Debug, Deserialize)]
pub struct ChangePasswordCommand {
    pub user_id: i64,
    pub old_password: String,
    pub new_password: String,
}

/// 프로필 수정 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileCommand {
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub preferred_contact_method: Option<String>,
}

/// 프로필 사진 수정 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfilePictureCommand {
    pub picture_url: String,
}

/// 알림/언어 설정 수정 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePreferencesCommand {
    pub preferred_language: Option<String>,
    pub email_notifications: Option<bool>,
}

/// 1. 사용자 생성 (비밀번호 해싱, 기본 프로필 생성)
pub async fn handle_create_user(
    cmd: RegisterUserCommand,
    db_manager: &DatabaseManager,
) -> Result<User, serde_json::Value> {
    info!("{:<12} --> 사용자 생성 요청: {}", "Command", cmd.email);

    if cmd.email.trim().is_empty() || cmd.password.trim().is_empty() {
        return Err(serde_json::json!({
            "error": "Email and password are required",
            "code": "MISSING_FIELDS"
        }));
    }

    // 이메일 중복 확인
    let existing = queries::get_user_by_email(db_manager, cmd.email.clone())
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    if existing.is_some() {
        return Err(serde_json::json!({
            "error": "Email already registered",
            "code": "EMAIL_IN_USE"
        }));
    }

    let password_hash = security::hash_password(&cmd.password)
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let verification_token = Uuid::new_v4().to_string();

    let user = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(
                    "INSERT INTO users (username, email, password_hash, first_name, last_name, phone_number, province, district, is_active, verification_token, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9, $10)
                     RETURNING *",
                )
                .bind(cmd.username)
                .bind(cmd.email)
                .bind(password_hash)
                .bind(cmd.first_name)
                .bind(cmd.last_name)
                .bind(cmd.phone_number)
                .bind(cmd.province)
                .bind(cmd.district)
                .bind(verification_token)
                .bind(Utc::now())
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    // 기본 프로필 생성
    let user_id = user.id;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("INSERT INTO user_profiles (user_id, created_at) VALUES ($1, $2)")
                    .bind(user_id)
                    .bind(Utc::now())
                    .execute(&mut **tx)
                    .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(user)
}

/// 2. 회원 가입
pub async fn handle_register_user(
    cmd: RegisterUserCommand,
    db_manager: &DatabaseManager,
) -> Result<serde_json::Value, serde_json::Value> {
    info!("{:<12} --> 회원 가입 요청: {}", "Command", cmd.email);
    let user = handle_create_user(cmd, db_manager).await?;

    Ok(serde_json::json!({
        "message": "User registered successfully",
        "user": {
            "id": user.id,
            "username": user.username,
            "email": user.email
        }
    }))
}

/// 3. 로그인 (비밀번호 대조, 마지막 로그인 시각 갱신)
pub async fn handle_login(
    cmd: LoginCommand,
    db_manager: &DatabaseManager,
) -> Result<User, serde_json::Value> {
    info!("{:<12} --> 로그인 요청: {}", "Command", cmd.email);

    let user = queries::get_user_by_email(db_manager, cmd.email.clone())
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let Some(user) = user else {
        return Err(serde_json::json!({
            "error": "Invalid email or password",
            "code": "WRONG_PASSWORD"
        }));
    };

    if !security::verify_password(&cmd.password, &user.password_hash) {
        return Err(serde_json::json!({
            "error": "Invalid email or password",
            "code": "WRONG_PASSWORD"
        }));
    }

    let user_id = user.id;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(
                    "UPDATE users SET last_login_at = $1 WHERE id = $2 RETURNING *",
                )
                .bind(Utc::now())
                .bind(user_id)
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))
}

/// 4. 이메일 인증 (계정 활성화)
pub async fn handle_verify_email(
    cmd: VerifyEmailCommand,
    db_manager: &DatabaseManager,
) -> Result<serde_json::Value, serde_json::Value> {
    info!("{:<12} --> 이메일 인증 요청", "Command");

    let user = queries::get_user_by_token(db_manager, cmd.token)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let Some(user) = user else {
        return Err(serde_json::json!({
            "error": "Invalid verification token",
            "code": "INVALID_TOKEN"
        }));
    };

    let user_id = user.id;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(
                    "UPDATE users SET is_active = TRUE, verification_token = NULL, updated_at = $1 WHERE id = $2",
                )
                .bind(Utc::now())
                .bind(user_id)
                .execute(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(serde_json::json!({"message": "Email verified successfully"}))
}

/// 5. 비밀번호 재설정 토큰 발급
pub async fn handle_forgot_password(
    cmd: ForgotPasswordCommand,
    db_manager: &DatabaseManager,
) -> Result<serde_json::Value, serde_json::Value> {
    info!("{:<12} --> 비밀번호 재설정 요청: {}", "Command", cmd.email);

    let user = queries::get_user_by_email(db_manager, cmd.email)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let Some(user) = user else {
        return Err(serde_json::json!({
            "error": "Email not found",
            "code": "NOT_FOUND"
        }));
    };

    let reset_token = Uuid::new_v4().to_string();
    let user_id = user.id;
    let token = reset_token.clone();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("UPDATE users SET verification_token = $1, updated_at = $2 WHERE id = $3")
                    .bind(token)
                    .bind(Utc::now())
                    .bind(user_id)
                    .execute(&mut **tx)
                    .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(serde_json::json!({
        "message": "Password reset token generated",
        "reset_token": reset_token
    }))
}

/// 6. 비밀번호 재설정 (토큰 사용)
pub async fn handle_reset_password(
    cmd: ResetPasswordCommand,
    db_manager: &DatabaseManager,
) -> Result<serde_json::Value, serde_json::Value> {
    info!("{:<12} --> 비밀번호 재설정 처리", "Command");

    let user = queries::get_user_by_token(db_manager, cmd.token)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let Some(user) = user else {
        return Err(serde_json::json!({
            "error": "Invalid reset token",
            "code": "INVALID_TOKEN"
        }));
    };

    let password_hash = security::hash_password(&cmd.new_password)
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let user_id = user.id;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query(
                    "UPDATE users SET password_hash = $1, verification_token = NULL, updated_at = $2 WHERE id = $3",
                )
                .bind(password_hash)
                .bind(Utc::now())
                .bind(user_id)
                .execute(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(serde_json::json!({"message": "Password reset successfully"}))
}

/// 7. 비밀번호 변경 (기존 비밀번호 확인)
pub async fn handle_change_password(
    cmd: ChangePasswordCommand,
    db_manager: &DatabaseManager,
) -> Result<serde_json::Value, serde_json::Value> {
    info!("{:<12} --> 비밀번호 변경 요청 user_id: {}", "Command", cmd.user_id);

    let user = queries::get_user(db_manager, cmd.user_id)
        .await
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let Some(user) = user else {
        return Err(serde_json::json!({
            "error": "User not found",
            "code": "NOT_FOUND"
        }));
    };

    if !security::verify_password(&cmd.old_password, &user.password_hash) {
        return Err(serde_json::json!({
            "error": "Current password is incorrect",
            "code": "WRONG_PASSWORD"
        }));
    }

    let password_hash = security::hash_password(&cmd.new_password)
        .map_err(|e| serde_json::json!({"error": e.to_string()}))?;
    let user_id = user.id;
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3")
                    .bind(password_hash)
                    .bind(Utc::now())
                    .bind(user_id)
                    .execute(&mut **tx)
                    .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    Ok(serde_json::json!({"message": "Password changed successfully"}))
}

/// 8. 계정 정지
pub async fn handle_suspend_user(
    user_id: i64,
    db_manager: &DatabaseManager,
) -> Result<User, serde_json::Value> {
    info!("{:<12} --> 계정 정지 user_id: {}", "Command", user_id);
    set_user_active(user_id, false, db_manager).await
}

/// 9. 계정 정지 해제
pub async fn handle_unsuspend_user(
    user_id: i64,
    db_manager: &DatabaseManager,
) -> Result<User, serde_json::Value> {
    info!("{:<12} --> 계정 정지 해제 user_id: {}", "Command", user_id);
    set_user_active(user_id, true, db_manager).await
}

/// 활성 플래그 변경
async fn set_user_active(
    user_id: i64,
    is_active: bool,
    db_manager: &DatabaseManager,
) -> Result<User, serde_json::Value> {
    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, User>(
                    "UPDATE users SET is_active = $1, updated_at = $2 WHERE id = $3 RETURNING *",
                )
                .bind(is_active)
                .bind(Utc::now())
                .bind(user_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "User not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 10. 프로필 수정
pub async fn handle_update_profile(
    user_id: i64,
    cmd: UpdateProfileCommand,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    info!("{:<12} --> 프로필 수정 user_id: {}", "Command", user_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(
                    "UPDATE user_profiles
                     SET bio = COALESCE($1, bio),
                         profile_picture_url = COALESCE($2, profile_picture_url),
                         preferred_contact_method = COALESCE($3, preferred_contact_method),
                         updated_at = $4
                     WHERE user_id = $5
                     RETURNING *",
                )
                .bind(cmd.bio)
                .bind(cmd.profile_picture_url)
                .bind(cmd.preferred_contact_method)
                .bind(Utc::now())
                .bind(user_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Profile not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 11. 프로필 사진 수정
pub async fn handle_update_profile_picture(
    user_id: i64,
    cmd: UpdateProfilePictureCommand,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    info!("{:<12} --> 프로필 사진 수정 user_id: {}", "Command", user_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(
                    "UPDATE user_profiles SET profile_picture_url = $1, updated_at = $2 WHERE user_id = $3 RETURNING *",
                )
                .bind(cmd.picture_url)
                .bind(Utc::now())
                .bind(user_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Profile not found",
            "code": "NOT_FOUND"
        })
    })
}

/// 12. 알림/언어 설정 수정
pub async fn handle_update_preferences(
    user_id: i64,
    cmd: UpdatePreferencesCommand,
    db_manager: &DatabaseManager,
) -> Result<UserProfile, serde_json::Value> {
    info!("{:<12} --> 설정 수정 user_id: {}", "Command", user_id);

    let updated = db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, UserProfile>(
                    "UPDATE user_profiles
                     SET preferred_language = COALESCE($1, preferred_language),
                         email_notifications = COALESCE($2, email_notifications),
                         updated_at = $3
                     WHERE user_id = $4
                     RETURNING *",
                )
                .bind(cmd.preferred_language)
                .bind(cmd.email_notifications)
                .bind(Utc::now())
                .bind(user_id)
                .fetch_optional(&mut **tx)
                .await
            })
        })
        .await
        .map_err(|e: sqlx::Error| serde_json::json!({"error": e.to_string()}))?;

    updated.ok_or_else(|| {
        serde_json::json!({
            "error": "Profile not found",
            "code": "NOT_FOUND"
        })
    })
}

// endregion: --- Commands
