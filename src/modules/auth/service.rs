use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use lonca_auth::jwt::{create_access_token, create_refresh_token, verify_refresh_token};
use lonca_config::jwt::JwtConfig;
use lonca_core::errors::AppError;
use lonca_core::password::{hash_password, verify_password};
use lonca_models::members::Member;
use lonca_models::roles::normalize_key;

use super::model::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshResponse, RefreshTokenRequest,
    RegisterRequestDto,
};

pub struct AuthService;

impl AuthService {
    /// Creates a member account plus an unapproved assignment for the
    /// requested role. The account stays permissionless until the email is
    /// confirmed and the assignment is approved.
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequestDto) -> Result<Member, AppError> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM members WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let requested_role = normalize_key(&dto.requested_role);
        if requested_role.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Requested role is not a valid role key"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let member = sqlx::query_as::<_, Member>(
            "INSERT INTO members (first_name, last_name, email, password)
             VALUES ($1, $2, $3, $4)
             RETURNING id, first_name, last_name, email, email_confirmed, created_at, updated_at",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        sqlx::query(
            "INSERT INTO role_assignments (member_id, role_key, approved)
             VALUES ($1, $2, false)
             ON CONFLICT (member_id, role_key) DO NOTHING",
        )
        .bind(member.id)
        .bind(&requested_role)
        .execute(db)
        .await?;

        Ok(member)
    }

    /// Verifies credentials, issues an access/refresh token pair, and
    /// registers the refresh session so sign-out can revoke it.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct MemberWithPassword {
            id: Uuid,
            first_name: String,
            last_name: String,
            email: String,
            email_confirmed: bool,
            password: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, MemberWithPassword>(
            "SELECT id, first_name, last_name, email, email_confirmed, password,
                    created_at, updated_at
             FROM members WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let access_token = create_access_token(row.id, &row.email, jwt_config)?;
        let refresh_token = create_refresh_token(row.id, &row.email, jwt_config)?;

        // Read the jti back out of the freshly minted token to register it.
        let refresh_claims = verify_refresh_token(&refresh_token, jwt_config)?;
        let expires_at = DateTime::<Utc>::from_timestamp(refresh_claims.exp as i64, 0)
            .ok_or_else(|| AppError::internal_error("Refresh token expiry out of range"))?;

        sqlx::query(
            "INSERT INTO auth_sessions (jti, member_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(&refresh_claims.jti)
        .bind(row.id)
        .bind(expires_at)
        .execute(db)
        .await?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
            member: Member {
                id: row.id.into(),
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                email_confirmed: row.email_confirmed,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }

    /// Mints a fresh access token from a refresh token whose session is
    /// still registered.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn refresh(
        db: &PgPool,
        dto: RefreshTokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let claims = verify_refresh_token(&dto.refresh_token, jwt_config)?;

        let registered: Option<(String,)> = sqlx::query_as(
            "SELECT jti FROM auth_sessions WHERE jti = $1 AND expires_at > now()",
        )
        .bind(&claims.jti)
        .fetch_optional(db)
        .await?;

        if registered.is_none() {
            return Err(AppError::unauthorized("Session has been signed out"));
        }

        let member_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid member ID in token"))?;
        let access_token = create_access_token(member_id, &claims.email, jwt_config)?;

        Ok(RefreshResponse { access_token })
    }

    /// Sign-out: revokes one refresh session, or every session the member
    /// holds when `all_sessions` is set.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn logout(
        db: &PgPool,
        member_id: Uuid,
        dto: LogoutRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(), AppError> {
        if dto.all_sessions {
            sqlx::query("DELETE FROM auth_sessions WHERE member_id = $1")
                .bind(member_id)
                .execute(db)
                .await?;
            return Ok(());
        }

        let refresh_token = dto.refresh_token.ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!(
                "refresh_token is required unless all_sessions is set"
            ))
        })?;

        let claims = verify_refresh_token(&refresh_token, jwt_config)?;
        if claims.sub != member_id.to_string() {
            return Err(AppError::forbidden(
                "Refresh token belongs to a different member",
            ));
        }

        sqlx::query("DELETE FROM auth_sessions WHERE jti = $1 AND member_id = $2")
            .bind(&claims.jti)
            .bind(member_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
