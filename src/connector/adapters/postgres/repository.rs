//! `PostgreSQL` repository implementation for connector instances.

use super::{
    models::{ConnectorChangeset, ConnectorRow, NewConnectorRow},
    schema::connector_instances,
};
use crate::catalog::domain::IntegrationId;
use crate::connector::{
    domain::{
        ConnectorId, ConnectorInstance, ConnectorName, ConnectorStatus, PersistedConnectorData,
        SealedCredentials, WorkspaceId,
    },
    ports::{ConnectorRepository, ConnectorRepositoryError, ConnectorRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by connector adapters.
pub type ConnectorPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed connector repository.
#[derive(Debug, Clone)]
pub struct PostgresConnectorRepository {
    pool: ConnectorPgPool,
}

impl PostgresConnectorRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ConnectorPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ConnectorRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ConnectorRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ConnectorRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ConnectorRepositoryError::persistence)?
    }
}

#[async_trait]
impl ConnectorRepository for PostgresConnectorRepository {
    async fn insert(&self, instance: &ConnectorInstance) -> ConnectorRepositoryResult<()> {
        let connector_id = instance.id();
        let new_row = to_new_row(instance)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(connector_instances::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ConnectorRepositoryError::DuplicateConnector(connector_id)
                    }
                    _ => ConnectorRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, instance: &ConnectorInstance) -> ConnectorRepositoryResult<()> {
        let connector_id = instance.id();
        let changeset = to_changeset(instance)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                connector_instances::table
                    .filter(connector_instances::id.eq(connector_id.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(ConnectorRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ConnectorRepositoryError::NotFound(connector_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ConnectorId) -> ConnectorRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                connector_instances::table.filter(connector_instances::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(ConnectorRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ConnectorRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ConnectorId,
    ) -> ConnectorRepositoryResult<Option<ConnectorInstance>> {
        self.run_blocking(move |connection| {
            let row = connector_instances::table
                .filter(connector_instances::id.eq(id.into_inner()))
                .select(ConnectorRow::as_select())
                .first::<ConnectorRow>(connection)
                .optional()
                .map_err(ConnectorRepositoryError::persistence)?;
            row.map(row_to_instance).transpose()
        })
        .await
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ConnectorRepositoryResult<Vec<ConnectorInstance>> {
        self.run_blocking(move |connection| {
            connector_instances::table
                .filter(connector_instances::workspace_id.eq(workspace_id.into_inner()))
                .order((
                    connector_instances::created_at.asc(),
                    connector_instances::id.asc(),
                ))
                .select(ConnectorRow::as_select())
                .load::<ConnectorRow>(connection)
                .map_err(ConnectorRepositoryError::persistence)?
                .into_iter()
                .map(row_to_instance)
                .collect()
        })
        .await
    }

    async fn list_all(&self) -> ConnectorRepositoryResult<Vec<ConnectorInstance>> {
        self.run_blocking(move |connection| {
            connector_instances::table
                .order((
                    connector_instances::created_at.asc(),
                    connector_instances::id.asc(),
                ))
                .select(ConnectorRow::as_select())
                .load::<ConnectorRow>(connection)
                .map_err(ConnectorRepositoryError::persistence)?
                .into_iter()
                .map(row_to_instance)
                .collect()
        })
        .await
    }
}

fn to_new_row(instance: &ConnectorInstance) -> ConnectorRepositoryResult<NewConnectorRow> {
    let credentials = serde_json::to_value(instance.credentials())
        .map_err(ConnectorRepositoryError::persistence)?;

    Ok(NewConnectorRow {
        id: instance.id().into_inner(),
        integration_id: instance.integration_id().as_str().to_owned(),
        workspace_id: instance.workspace_id().into_inner(),
        name: instance.name().as_str().to_owned(),
        config: instance.config().clone(),
        credentials,
        status: instance.status().as_str().to_owned(),
        status_message: instance.status_message().map(str::to_owned),
        created_at: instance.created_at(),
        updated_at: instance.updated_at(),
    })
}

fn to_changeset(instance: &ConnectorInstance) -> ConnectorRepositoryResult<ConnectorChangeset> {
    let credentials = serde_json::to_value(instance.credentials())
        .map_err(ConnectorRepositoryError::persistence)?;

    Ok(ConnectorChangeset {
        name: instance.name().as_str().to_owned(),
        config: instance.config().clone(),
        credentials,
        status: instance.status().as_str().to_owned(),
        status_message: instance.status_message().map(str::to_owned),
        updated_at: instance.updated_at(),
    })
}

fn row_to_instance(row: ConnectorRow) -> ConnectorRepositoryResult<ConnectorInstance> {
    let ConnectorRow {
        id,
        integration_id: persisted_integration_id,
        workspace_id,
        name: persisted_name,
        config,
        credentials: persisted_credentials,
        status: persisted_status,
        status_message,
        created_at,
        updated_at,
    } = row;

    let integration_id = IntegrationId::new(persisted_integration_id)
        .map_err(ConnectorRepositoryError::invalid_persisted_data)?;
    let name = ConnectorName::new(persisted_name)
        .map_err(ConnectorRepositoryError::invalid_persisted_data)?;
    let credentials = serde_json::from_value::<SealedCredentials>(persisted_credentials)
        .map_err(ConnectorRepositoryError::invalid_persisted_data)?;
    let status = ConnectorStatus::try_from(persisted_status.as_str())
        .map_err(ConnectorRepositoryError::invalid_persisted_data)?;

    Ok(ConnectorInstance::from_persisted(PersistedConnectorData {
        id: ConnectorId::from_uuid(id),
        integration_id,
        workspace_id: WorkspaceId::from_uuid(workspace_id),
        name,
        config,
        credentials,
        status,
        status_message,
        created_at,
        updated_at,
    }))
}
