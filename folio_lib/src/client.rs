//! Typed admin operations on top of the request helpers.

use chrono::NaiveDate;
use folio_api::types::{
    Ack, AvailabilityRule, Booking, BookingStatus, BookingStatusUpdate, ContactMessage,
    DashboardStats, DataResponse, EventType, EventTypeInput, ListResponse, Post, PostInput,
    Project,
};
use folio_api::{Client, ClientConfig, ReqwestTransport, Transport};
use serde_json::json;

use crate::error::FolioError;

/// Filters for the bookings list.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    /// First day included, by start date.
    pub from: Option<NaiveDate>,
    /// Last day included, by start date.
    pub to: Option<NaiveDate>,
}

impl BookingFilter {
    /// Filter covering the inclusive day range `from..=to`.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn to_endpoint(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(status) = self.status {
            query.append_pair("status", &status.to_string());
        }
        if let Some(from) = self.from {
            query.append_pair("from", &from.format("%Y-%m-%d").to_string());
        }
        if let Some(to) = self.to {
            query.append_pair("to", &to.format("%Y-%m-%d").to_string());
        }
        let query = query.finish();
        if query.is_empty() {
            "admin/bookings".to_string()
        } else {
            format!("admin/bookings?{}", query)
        }
    }
}

/// Path of one record in an admin collection, with `id` escaped as a single
/// path segment.
fn resource_path(collection: &str, id: &str) -> Result<String, FolioError> {
    let id = id.trim();
    if id.is_empty() || id == "." || id == ".." {
        return Err(FolioError::InvalidInput(format!(
            "invalid {} id '{}'",
            collection, id
        )));
    }
    Ok(format!("admin/{}/{}", collection, urlencoding::encode(id)))
}

/// Admin dashboard and scheduling panel operations.
///
/// Each method is one request; failures come back as [`FolioError::Api`]
/// carrying the structured error untouched.
pub struct AdminClient<T = ReqwestTransport> {
    inner: Client<T>,
}

impl AdminClient<ReqwestTransport> {
    /// Creates an admin client backed by `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, FolioError> {
        let inner = Client::new(config).map_err(|e| FolioError::Config(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates an admin client for the given origin. Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, FolioError> {
        Ok(Self {
            inner: Client::with_base_url(base_url)?,
        })
    }
}

impl<T: Transport> AdminClient<T> {
    /// The underlying request client.
    pub fn api(&self) -> &Client<T> {
        &self.inner
    }

    /// Whether the connection settings were explicitly provided.
    pub fn is_configured(&self) -> bool {
        self.inner.config().is_configured()
    }

    // -- Scheduling --

    /// Lists bookings matching `filter`.
    pub async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, FolioError> {
        let resp: ListResponse<Booking> = self.inner.get(&filter.to_endpoint()).await?;
        tracing::debug!("Fetched {} bookings", resp.data.len());
        Ok(resp.data)
    }

    /// Changes a booking's status, optionally emailing the guest.
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
        notify_guest: bool,
    ) -> Result<Booking, FolioError> {
        let body = BookingStatusUpdate {
            status,
            notify_guest,
        };
        let resp: DataResponse<Booking> = self
            .inner
            .patch(&resource_path("bookings", id)?, &body)
            .await?;
        tracing::info!("Booking {} is now {}", id, status);
        Ok(resp.data)
    }

    pub async fn delete_booking(&self, id: &str) -> Result<Ack, FolioError> {
        Ok(self.inner.delete(&resource_path("bookings", id)?).await?)
    }

    pub async fn list_event_types(&self) -> Result<Vec<EventType>, FolioError> {
        let resp: ListResponse<EventType> = self.inner.get("admin/event-types").await?;
        Ok(resp.data)
    }

    pub async fn create_event_type(&self, input: &EventTypeInput) -> Result<EventType, FolioError> {
        let resp: DataResponse<EventType> = self.inner.post("admin/event-types", input).await?;
        tracing::info!("Created event type {}", resp.data.slug);
        Ok(resp.data)
    }

    pub async fn update_event_type(
        &self,
        id: &str,
        input: &EventTypeInput,
    ) -> Result<EventType, FolioError> {
        let resp: DataResponse<EventType> = self
            .inner
            .patch(&resource_path("event-types", id)?, input)
            .await?;
        Ok(resp.data)
    }

    pub async fn delete_event_type(&self, id: &str) -> Result<Ack, FolioError> {
        Ok(self.inner.delete(&resource_path("event-types", id)?).await?)
    }

    pub async fn list_availability(&self) -> Result<Vec<AvailabilityRule>, FolioError> {
        let resp: ListResponse<AvailabilityRule> = self.inner.get("admin/availability").await?;
        Ok(resp.data)
    }

    // -- Content --

    pub async fn list_posts(&self) -> Result<Vec<Post>, FolioError> {
        let resp: ListResponse<Post> = self.inner.get("admin/posts").await?;
        Ok(resp.data)
    }

    pub async fn create_post(&self, input: &PostInput) -> Result<Post, FolioError> {
        let resp: DataResponse<Post> = self.inner.post("admin/posts", input).await?;
        Ok(resp.data)
    }

    /// Publishes or unpublishes a post.
    pub async fn publish_post(&self, id: &str, published: bool) -> Result<Post, FolioError> {
        let input = PostInput {
            published: Some(published),
            ..PostInput::default()
        };
        let resp: DataResponse<Post> = self
            .inner
            .patch(&resource_path("posts", id)?, &input)
            .await?;
        Ok(resp.data)
    }

    pub async fn delete_post(&self, id: &str) -> Result<Ack, FolioError> {
        Ok(self.inner.delete(&resource_path("posts", id)?).await?)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, FolioError> {
        let resp: ListResponse<Project> = self.inner.get("admin/projects").await?;
        Ok(resp.data)
    }

    pub async fn delete_project(&self, id: &str) -> Result<Ack, FolioError> {
        Ok(self.inner.delete(&resource_path("projects", id)?).await?)
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>, FolioError> {
        let resp: ListResponse<ContactMessage> = self.inner.get("admin/messages").await?;
        Ok(resp.data)
    }

    pub async fn mark_message_read(&self, id: &str, read: bool) -> Result<Ack, FolioError> {
        Ok(self
            .inner
            .patch(&resource_path("messages", id)?, &json!({ "read": read }))
            .await?)
    }

    pub async fn delete_message(&self, id: &str) -> Result<Ack, FolioError> {
        Ok(self.inner.delete(&resource_path("messages", id)?).await?)
    }

    /// Dashboard counters.
    pub async fn get_stats(&self) -> Result<DashboardStats, FolioError> {
        Ok(self.inner.get("admin/stats").await?)
    }
}
