use crate::dto::auth_dto::{
    ApiResponse, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
    UpdateProfileRequest,
};
use crate::models::profile::Profile;
use crate::repositories::profile_repository::ProfileRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct AuthController {
    repository: ProfileRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: ProfileRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<ProfileResponse>, AppError> {
        // Validar antes de tocar la base de datos
        request.validate()?;

        let email = request.email.trim().to_lowercase();

        // Verificar que el email no exista
        if self.repository.email_exists(&email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let profile = Profile::new(email, password_hash, request.full_name);
        let saved = self.repository.create(&profile).await?;

        Ok(ApiResponse::success_with_message(
            ProfileResponse::from(saved),
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let email = request.email.trim().to_lowercase();

        // Buscar perfil por email
        let profile = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &profile.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        // Generar JWT token
        let token = generate_token(profile.id, &self.jwt_config)?;

        Ok(LoginResponse::success(
            token,
            profile.id.to_string(),
            profile.email,
        ))
    }

    pub async fn me(&self, user_id: Uuid) -> Result<ProfileResponse, AppError> {
        let profile = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Perfil no encontrado".to_string()))?;

        Ok(ProfileResponse::from(profile))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ApiResponse<ProfileResponse>, AppError> {
        request.validate()?;

        let updated = self
            .repository
            .update(user_id, request.full_name, request.avatar_url)
            .await?;

        Ok(ApiResponse::success_with_message(
            ProfileResponse::from(updated),
            "Perfil actualizado exitosamente".to_string(),
        ))
    }
}
