use sqlx::PgPool;

use crate::dto::auth_dto::UsuarioFiltro;
use crate::dto::common_dto::{ListParams, Page};
use crate::models::usuario::{Usuario, UsuarioPublico};
use crate::repositories::query::{Assignments, Conditions, ListFilter, ListQuery, SortSpec};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::patch::Patch;

const SELECT_PUBLICO: &str = "SELECT id, username, nombre, rol, activo FROM usuarios";

const LIST_USUARIOS: ListQuery = ListQuery {
    select: SELECT_PUBLICO,
    count: "SELECT COUNT(*) FROM usuarios",
    sort: SortSpec {
        columns: &[("id", "id"), ("username", "username"), ("nombre", "nombre"), ("rol", "rol")],
        default: "username",
    },
};

impl ListFilter for UsuarioFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        conditions
            .contains("username", self.username.as_deref())
            .eq("rol", self.rol.clone())
            .eq("activo", self.activo);
        Ok(())
    }
}

/// Alta de usuario con la contraseña ya hasheada
#[derive(Debug)]
pub struct NuevoUsuario {
    pub username: String,
    pub password_hash: String,
    pub nombre: Option<String>,
    pub rol: String,
    pub activo: bool,
}

#[derive(Debug, Default)]
pub struct UsuarioCambios {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub nombre: Patch<String>,
    pub rol: Option<String>,
    pub activo: Option<bool>,
}

pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filtro: &UsuarioFiltro,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<Page<UsuarioPublico>> {
        LIST_USUARIOS
            .fetch_page(&self.pool, filtro, params, default_page_size)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<UsuarioPublico>> {
        let query = format!("{} WHERE id = $1", SELECT_PUBLICO);
        let usuario = sqlx::query_as::<_, UsuarioPublico>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(usuario)
    }

    /// Incluye la contraseña almacenada; sólo para el login
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT id, username, password, nombre, rol, activo FROM usuarios WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn create(&self, nuevo: NuevoUsuario) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO usuarios (username, password, nombre, rol, activo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(nuevo.username)
        .bind(nuevo.password_hash)
        .bind(nuevo.nombre)
        .bind(nuevo.rol)
        .bind(nuevo.activo)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(&self, id: i32, cambios: UsuarioCambios) -> AppResult<()> {
        let mut set = Assignments::new("usuarios");
        set.set("username", cambios.username)
            .set("password", cambios.password_hash)
            .set_patch("nombre", cambios.nombre)
            .set("rol", cambios.rol)
            .set("activo", cambios.activo);

        if set.execute(&self.pool, id).await? == 0 {
            return Err(not_found_error("Usuario", id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Usuario", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_never_selects_password() {
        let data = LIST_USUARIOS
            .data_query(&UsuarioFiltro::default(), &ListParams::default(), 10)
            .unwrap();
        assert!(!data.sql().contains("password"));
    }
}
