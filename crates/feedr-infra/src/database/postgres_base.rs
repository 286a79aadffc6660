use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, DbConn, EntityTrait, IdenStatic, IntoActiveModel, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait,
};

use feedr_core::error::RepoError;
use feedr_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation shared by the user and post
/// repositories.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    /// Upsert: ids are generated client-side, so the primary key is always
    /// set and a plain `ActiveModel::save` would only ever UPDATE. Insert
    /// with an ON CONFLICT clause covers both creation and update in one
    /// statement.
    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let active_model: E::ActiveModel = entity.into();

        let pk_columns: Vec<E::Column> = E::PrimaryKey::iter()
            .map(PrimaryKeyToColumn::into_column)
            .collect();
        let pk_names: Vec<&str> = pk_columns.iter().map(|c| c.as_str()).collect();
        let data_columns: Vec<E::Column> = E::Column::iter()
            .filter(|c| !pk_names.contains(&c.as_str()))
            .collect();

        let mut on_conflict = OnConflict::columns(pk_columns);
        on_conflict.update_columns(data_columns);

        let model = E::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    RepoError::Constraint("Entity already exists".to_string())
                } else {
                    RepoError::Query(err_str)
                }
            })?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entity::user;
    use feedr_core::domain::User;
    use feedr_core::ports::BaseRepository;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn save_issues_an_insert_for_a_fresh_entity() {
        let fresh = User::new(
            "Maria".to_owned(),
            "maria@example.com".to_owned(),
            "digest".to_owned(),
        );
        let returned = user::Model {
            id: fresh.id,
            email: fresh.email.clone(),
            name: fresh.name.clone(),
            password_hash: fresh.password_hash.clone(),
            status: fresh.status.clone(),
            post_ids: serde_json::json!([]),
            created_at: fresh.created_at.into(),
            updated_at: fresh.updated_at.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![returned]])
            .into_connection();

        let repo = PostgresBaseRepository::<user::Entity>::new(db);
        let saved: User = repo.save(fresh.clone()).await.unwrap();
        assert_eq!(saved.id, fresh.id);
        assert_eq!(saved.email, "maria@example.com");

        // A record whose id is set before the first write must still be
        // created, not silently turned into a no-row UPDATE.
        let log = format!("{:?}", repo.db.into_transaction_log());
        assert!(log.contains("INSERT"));
        assert!(log.contains("ON CONFLICT"));
    }
}
