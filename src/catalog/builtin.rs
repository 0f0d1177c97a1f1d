//! Built-in integration definitions loaded at process start.

use crate::catalog::domain::{
    AuthScheme, CatalogError, FieldSpec, FieldType, IntegrationCategory, IntegrationDefinition,
    IntegrationId, PayloadSchema,
};

/// Returns the built-in integration definitions in catalog order.
///
/// # Errors
///
/// Returns [`CatalogError`] when a built-in identifier is malformed.
pub fn builtin_definitions() -> Result<Vec<IntegrationDefinition>, CatalogError> {
    Ok(vec![
        slack()?,
        stripe()?,
        salesforce()?,
        openai()?,
        github()?,
        gmail()?,
        notion()?,
        hubspot()?,
        twilio()?,
        http_request()?,
    ])
}

fn token_credentials(field: &str) -> PayloadSchema {
    PayloadSchema::empty().with_field(FieldSpec::required(field, FieldType::String))
}

fn oauth_credentials() -> PayloadSchema {
    PayloadSchema::empty()
        .with_field(FieldSpec::required("client_id", FieldType::String))
        .with_field(FieldSpec::required("client_secret", FieldType::String))
        .with_field(FieldSpec::required("refresh_token", FieldType::String))
}

fn slack() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("slack")?,
        "Slack",
        IntegrationCategory::Communication,
        "1.2.0",
    )
    .with_description("Post messages and manage channels in Slack workspaces")
    .with_auth(AuthScheme::BearerToken)
    .with_features([
        "messaging",
        "channels",
        "threads",
        "reactions",
        "file uploads",
    ])
    .with_config_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::optional("default_channel", FieldType::String))
            .with_field(FieldSpec::optional("unfurl_links", FieldType::Boolean)),
    )
    .with_credentials_schema(token_credentials("token"))
    .with_actions([
        "sendMessage",
        "updateMessage",
        "listChannels",
        "uploadFile",
        "addReaction",
    ]))
}

fn stripe() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("stripe")?,
        "Stripe",
        IntegrationCategory::Payments,
        "2.0.1",
    )
    .with_description("Accept payments and manage customers and invoices")
    .with_auth(AuthScheme::ApiKey)
    .with_features(["payments", "invoices", "subscriptions", "refunds"])
    .with_config_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::optional("account_id", FieldType::String))
            .with_field(
                FieldSpec::optional("mode", FieldType::Select).with_options(["test", "live"]),
            ),
    )
    .with_credentials_schema(token_credentials("api_key"))
    .with_actions([
        "createCustomer",
        "createPaymentIntent",
        "refundPayment",
        "listInvoices",
    ]))
}

fn salesforce() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("salesforce")?,
        "Salesforce",
        IntegrationCategory::Crm,
        "1.0.0",
    )
    .with_description("Read and write CRM records in Salesforce orgs")
    .with_auth(AuthScheme::Oauth2)
    .with_features(["crm", "leads", "opportunities", "soql"])
    .with_config_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::required("instance_url", FieldType::String))
            .with_field(FieldSpec::optional("api_version", FieldType::String)),
    )
    .with_credentials_schema(oauth_credentials())
    .with_actions(["createRecord", "updateRecord", "deleteRecord", "query"]))
}

fn openai() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("openai")?,
        "OpenAI",
        IntegrationCategory::Ai,
        "1.4.0",
    )
    .with_description("Generate text and embeddings with OpenAI models")
    .with_auth(AuthScheme::ApiKey)
    .with_features(["chat completions", "embeddings", "moderation", "llm"])
    .with_config_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::optional("default_model", FieldType::String))
            .with_field(FieldSpec::optional("organization", FieldType::String))
            .with_field(FieldSpec::optional("max_tokens", FieldType::Integer)),
    )
    .with_credentials_schema(token_credentials("api_key"))
    .with_actions([
        "createChatCompletion",
        "createEmbedding",
        "moderateContent",
    ]))
}

fn github() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("github")?,
        "GitHub",
        IntegrationCategory::DeveloperTools,
        "1.1.0",
    )
    .with_description("Automate issues, pull requests and repositories on GitHub")
    .with_auth(AuthScheme::BearerToken)
    .with_features(["repositories", "issues", "pull requests", "webhooks"])
    .with_config_schema(
        PayloadSchema::empty().with_field(FieldSpec::optional("owner", FieldType::String)),
    )
    .with_credentials_schema(token_credentials("token"))
    .with_actions([
        "createIssue",
        "commentOnIssue",
        "createPullRequest",
        "listRepositories",
    ]))
}

fn gmail() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("gmail")?,
        "Gmail",
        IntegrationCategory::Communication,
        "1.0.0",
    )
    .with_description("Send and read email through Gmail")
    .with_auth(AuthScheme::Oauth2)
    .with_features(["email", "drafts", "labels"])
    .with_credentials_schema(oauth_credentials())
    .with_actions(["sendEmail", "listMessages", "createDraft"]))
}

fn notion() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("notion")?,
        "Notion",
        IntegrationCategory::Productivity,
        "1.0.0",
    )
    .with_description("Create pages and query databases in Notion")
    .with_auth(AuthScheme::BearerToken)
    .with_features(["pages", "databases", "notes", "wiki"])
    .with_credentials_schema(token_credentials("token"))
    .with_actions(["createPage", "queryDatabase", "appendBlock"]))
}

fn hubspot() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("hubspot")?,
        "HubSpot",
        IntegrationCategory::Marketing,
        "1.0.0",
    )
    .with_description("Sync contacts and deals with HubSpot")
    .with_auth(AuthScheme::BearerToken)
    .with_features(["contacts", "deals", "email campaigns", "crm"])
    .with_credentials_schema(token_credentials("access_token"))
    .with_actions(["createContact", "updateContact", "createDeal"]))
}

fn twilio() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("twilio")?,
        "Twilio",
        IntegrationCategory::Communication,
        "1.0.0",
    )
    .with_description("Send SMS and place voice calls with Twilio")
    .with_auth(AuthScheme::Basic)
    .with_features(["sms", "voice", "phone numbers"])
    .with_config_schema(
        PayloadSchema::empty().with_field(FieldSpec::optional("from_number", FieldType::String)),
    )
    .with_credentials_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::required("account_sid", FieldType::String))
            .with_field(FieldSpec::required("auth_token", FieldType::String)),
    )
    .with_actions(["sendSms", "makeCall"]))
}

fn http_request() -> Result<IntegrationDefinition, CatalogError> {
    Ok(IntegrationDefinition::new(
        IntegrationId::new("http_request")?,
        "HTTP Request",
        IntegrationCategory::Utility,
        "1.0.0",
    )
    .with_description("Call any HTTP endpoint")
    .with_auth(AuthScheme::None)
    .with_features(["rest", "webhooks", "custom api"])
    .with_config_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::required("base_url", FieldType::String))
            .with_field(FieldSpec::optional("timeout_ms", FieldType::Integer))
            .with_field(FieldSpec::optional("default_headers", FieldType::Object))
            .with_field(
                FieldSpec::optional("auth_mode", FieldType::Select)
                    .with_options(["none", "bearer", "basic"]),
            ),
    )
    .with_credentials_schema(
        PayloadSchema::empty()
            .with_field(FieldSpec::optional("token", FieldType::String))
            .with_field(FieldSpec::optional("username", FieldType::String))
            .with_field(FieldSpec::optional("password", FieldType::String)),
    )
    .with_actions(["get", "post", "put", "patch", "delete"]))
}
