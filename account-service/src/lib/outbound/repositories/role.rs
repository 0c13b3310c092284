use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleName;
use crate::domain::role::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_unique_violation(e: sqlx::Error, name: &RoleName) -> RoleError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("roles_name_key") {
                return RoleError::NameAlreadyExists(name.to_string());
            }
        }
        RoleError::DatabaseError(e.to_string())
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl TryFrom<RoleRow> for Role {
    type Error = RoleError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Role {
            id: row.id,
            name: RoleName::new(row.name)?,
            description: row.description,
        })
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create(
        &self,
        name: &RoleName,
        description: Option<&str>,
    ) -> Result<Role, RoleError> {
        let row: RoleRow = sqlx::query_as(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name.as_str())
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, name))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Role>, RoleError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, description
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        row.map(Role::try_from).transpose()
    }

    async fn rename(&self, id: i64, name: &RoleName) -> Result<Role, RoleError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            UPDATE roles
            SET name = $2
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, name))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(RoleError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RoleError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RoleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RoleError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
