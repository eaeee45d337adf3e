//! Websocket ticket broker
//!
//! Streaming connections are authorized by a short-lived ticket obtained over
//! the signed REST API. A ticket is consumed by exactly one connection.

use crate::client::RestClient;
use crate::error::RestResult;
use bavg_types::StreamingTicket;
use tracing::{debug, instrument};

/// Path of the ticket-issuing endpoint
pub const TICKET_PATH: &str = "websocket/get_ticket";

/// Exchanges credentials for streaming tickets
#[derive(Debug, Clone)]
pub struct TicketBroker {
    client: RestClient,
}

impl TicketBroker {
    /// Create a broker issuing tickets through `client`
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Request a new ticket
    ///
    /// # Errors
    /// [`RestError::Decode`](crate::RestError::Decode) if the body is not
    /// `{"ticket": "<string>"}`, otherwise whatever the request executor
    /// reports.
    #[instrument(skip(self))]
    pub async fn get_ticket(&self) -> RestResult<StreamingTicket> {
        debug!("Requesting websocket ticket");
        let ticket = self.client.get_json(TICKET_PATH, &[]).await?;
        debug!("Got websocket ticket");
        Ok(ticket)
    }

    /// Public key sent alongside the ticket when dialing
    pub fn public_key(&self) -> &str {
        self.client.credentials().public_key()
    }
}
