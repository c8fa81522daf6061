//! HTTP client for the trip service.
//!
//! Implements the core's remote collaborators on top of `reqwest`. Every
//! call is attempted once; transport failures become
//! [`RemoteError::Network`] and non-success statuses become
//! [`RemoteError::Rejected`], except a 404 on a trip route which is
//! [`RemoteError::NotFound`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use plann_core::{
    NewTrip, ParticipantConfirmation, RemoteError, RemoteParticipantService, RemoteTripService,
    TripId, TripRecord, TripUpdate,
};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Owner details sent along with a new trip.
#[derive(Debug, Clone)]
pub struct Owner {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
struct CreateTripBody<'a> {
    #[serde(flatten)]
    trip: &'a NewTrip,
    owner_name: Option<&'a str>,
    owner_email: Option<&'a str>,
}

#[derive(Serialize)]
struct ConfirmBody<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Deserialize)]
struct TripEnvelope {
    trip: TripRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedTrip {
    trip_id: TripId,
}

/// Client for the trip and participant routes.
pub struct HttpTripService {
    client: Client,
    base_url: String,
    owner: Option<Owner>,
}

impl HttpTripService {
    pub fn new(base_url: &str, owner: Option<Owner>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner,
        })
    }

    pub fn has_owner(&self) -> bool {
        self.owner.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn trip_url(&self, id: &TripId) -> String {
        self.url(&format!("/trips/{id}"))
    }

    fn create_body<'a>(&'a self, trip: &'a NewTrip) -> CreateTripBody<'a> {
        CreateTripBody {
            trip,
            owner_name: self.owner.as_ref().map(|o| o.name.as_str()),
            owner_email: self.owner.as_ref().map(|o| o.email.as_str()),
        }
    }
}

fn network_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Network {
        message: e.to_string(),
    }
}

/// Passes successful responses through and maps the rest to errors.
async fn check_status(response: Response, trip: Option<&TripId>) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let Some(id) = trip.filter(|_| status == StatusCode::NOT_FOUND) {
        return Err(RemoteError::NotFound { id: id.to_string() });
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(RemoteError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RemoteTripService for HttpTripService {
    async fn create(&self, trip: &NewTrip) -> Result<TripId, RemoteError> {
        info!("POST {}", self.url("/trips"));
        let response = self
            .client
            .post(self.url("/trips"))
            .json(&self.create_body(trip))
            .send()
            .await
            .map_err(network_error)?;
        let created: CreatedTrip = check_status(response, None)
            .await?
            .json()
            .await
            .map_err(network_error)?;
        debug!("Trip service assigned id {}", created.trip_id);
        Ok(created.trip_id)
    }

    async fn get_by_id(&self, id: &TripId) -> Result<TripRecord, RemoteError> {
        info!("GET {}", self.trip_url(id));
        let response = self
            .client
            .get(self.trip_url(id))
            .send()
            .await
            .map_err(network_error)?;
        let envelope: TripEnvelope = check_status(response, Some(id))
            .await?
            .json()
            .await
            .map_err(network_error)?;
        Ok(envelope.trip)
    }

    async fn update(&self, id: &TripId, fields: &TripUpdate) -> Result<(), RemoteError> {
        info!("PUT {}", self.trip_url(id));
        let response = self
            .client
            .put(self.trip_url(id))
            .json(fields)
            .send()
            .await
            .map_err(network_error)?;
        check_status(response, Some(id)).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteParticipantService for HttpTripService {
    async fn confirm(&self, confirmation: &ParticipantConfirmation) -> Result<(), RemoteError> {
        let url = self.url(&format!(
            "/participants/{}/confirm",
            confirmation.participant_id
        ));
        info!("PATCH {url}");
        let response = self
            .client
            .patch(url)
            .json(&ConfirmBody {
                name: &confirmation.name,
                email: &confirmation.email,
            })
            .send()
            .await
            .map_err(network_error)?;
        check_status(response, None).await?;
        Ok(())
    }
}
