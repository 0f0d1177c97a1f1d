//! Diesel schema for connector instance persistence.

diesel::table! {
    /// Configured connector instances.
    connector_instances (id) {
        /// Internal connector identifier.
        id -> Uuid,
        /// Catalog integration identifier.
        #[max_length = 64]
        integration_id -> Varchar,
        /// Owning workspace.
        workspace_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Configuration payload.
        config -> Jsonb,
        /// Sealed credential payload.
        credentials -> Jsonb,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Last connection error, if any.
        status_message -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
