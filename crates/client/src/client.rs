//! HTTP calls, one method per endpoint.

use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use domain::models::booking::{
    BookingEnvelope, BookingResponse, CreateBookingRequest, ListBookingsResponse,
    UpdateBookingRequest,
};
use domain::models::partner_request::{
    CreatePartnerRequest, ListPartnerRequestsResponse, PartnerRequestDetails,
    PartnerRequestEnvelope, PartnerRequestResponse, RespondRequest,
};
use domain::models::{AuthResponse, LoginRequest, MeResponse, PublicUser, RespondAction, SignupRequest};

use crate::error::{api_error, ClientError};
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

/// Client for the CourtBook HTTP API.
///
/// Holds at most one [`Session`]; protected calls fail with
/// [`ClientError::NotAuthenticated`] when there is none.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self::with_http_client(Client::builder().build()?, base_url))
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drops the session, returning it.
    pub fn logout(&mut self) -> Option<Session> {
        self.session.take()
    }

    // Auth

    /// Creates an account and signs in as it.
    pub async fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .send(self.request(Method::POST, "/api/auth/signup").json(&body))
            .await?;
        Ok(self.install(auth))
    }

    /// Signs in and keeps the returned session.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .send(self.request(Method::POST, "/api/auth/login").json(&body))
            .await?;
        Ok(self.install(auth))
    }

    pub async fn me(&self) -> Result<PublicUser, ClientError> {
        let me: MeResponse = self
            .send(self.authed(Method::GET, "/api/auth/me")?)
            .await?;
        Ok(me.user)
    }

    pub async fn all_users(&self) -> Result<Vec<PublicUser>, ClientError> {
        self.send(self.authed(Method::GET, "/api/auth/all-users")?)
            .await
    }

    // Bookings

    pub async fn create_booking(
        &self,
        court_number: i32,
        location: &str,
        date: NaiveDate,
        time_slot: &str,
        partner_name: Option<&str>,
    ) -> Result<BookingResponse, ClientError> {
        let body = CreateBookingRequest {
            court_number: Some(court_number),
            location: Some(location.to_string()),
            date: Some(date),
            time_slot: Some(time_slot.to_string()),
            partner_name: partner_name.map(str::to_string),
        };
        let envelope: BookingEnvelope = self
            .send(self.authed(Method::POST, "/api/bookings")?.json(&body))
            .await?;
        Ok(envelope.booking)
    }

    pub async fn list_bookings(&self) -> Result<Vec<BookingResponse>, ClientError> {
        let list: ListBookingsResponse = self
            .send(self.authed(Method::GET, "/api/bookings")?)
            .await?;
        Ok(list.bookings)
    }

    pub async fn update_booking(
        &self,
        booking_id: Uuid,
        changes: &UpdateBookingRequest,
    ) -> Result<BookingResponse, ClientError> {
        let path = format!("/api/bookings/{}", booking_id);
        let envelope: BookingEnvelope = self
            .send(self.authed(Method::PUT, &path)?.json(changes))
            .await?;
        Ok(envelope.booking)
    }

    /// Returns the server's confirmation message.
    pub async fn delete_booking(&self, booking_id: Uuid) -> Result<String, ClientError> {
        let path = format!("/api/bookings/{}", booking_id);
        let response: MessageResponse = self.send(self.authed(Method::DELETE, &path)?).await?;
        Ok(response.message)
    }

    // Partner requests

    pub async fn send_partner_request(
        &self,
        to_user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<PartnerRequestResponse, ClientError> {
        let body = CreatePartnerRequest {
            to_user_id: Some(to_user_id),
            booking_id: Some(booking_id),
        };
        let envelope: PartnerRequestEnvelope = self
            .send(self.authed(Method::POST, "/api/partners/request")?.json(&body))
            .await?;
        Ok(envelope.request)
    }

    pub async fn incoming_requests(&self) -> Result<Vec<PartnerRequestDetails>, ClientError> {
        let list: ListPartnerRequestsResponse = self
            .send(self.authed(Method::GET, "/api/partners/incoming")?)
            .await?;
        Ok(list.requests)
    }

    pub async fn outgoing_requests(&self) -> Result<Vec<PartnerRequestDetails>, ClientError> {
        let list: ListPartnerRequestsResponse = self
            .send(self.authed(Method::GET, "/api/partners/outgoing")?)
            .await?;
        Ok(list.requests)
    }

    pub async fn respond_to_request(
        &self,
        request_id: Uuid,
        action: RespondAction,
    ) -> Result<PartnerRequestResponse, ClientError> {
        let path = format!("/api/partners/{}/respond", request_id);
        let body = RespondRequest {
            action: action.as_str().to_string(),
        };
        let envelope: PartnerRequestEnvelope = self
            .send(self.authed(Method::PUT, &path)?.json(&body))
            .await?;
        Ok(envelope.request)
    }

    fn install(&mut self, auth: AuthResponse) -> Session {
        let session = Session::new(auth.token, auth.user);
        self.session = Some(session.clone());
        session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(&session.token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "Request failed");
            ClientError::Network(e)
        })?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}
