//! Negotiates the handshake values both peers offer: the auth mechanism and
//! the three `Tune` numerics (channel-max, frame-max, heartbeat).

use crate::error::AmqpError;

/// Picks `client` if the server actually offers it among `server_mechanisms`
/// (space-separated in the wire format, already split by the caller).
///
/// # Errors
/// Returns [`AmqpError::NoSupportedMechanism`] if `client` is absent from
/// the server's list.
pub fn negotiate_auth_mechanism(client: &str, server_mechanisms: &[&str]) -> Result<String, AmqpError> {
    if server_mechanisms.contains(&client) {
        Ok(client.to_string())
    } else {
        Err(AmqpError::NoSupportedMechanism(
            server_mechanisms.iter().map(|s| (*s).to_string()).collect(),
        ))
    }
}

/// Picks the lower of `client`/`server`, except that `0` means "no
/// preference" and loses to whatever the other side proposed.
#[must_use]
pub fn negotiate_numeric(client: u32, server: u32) -> u32 {
    if server == 0 || client == 0 {
        server.max(client)
    } else {
        server.min(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiate_auth_mechanism_picks_the_client_choice_when_offered() {
        assert_eq!(
            negotiate_auth_mechanism("PLAIN", &["PLAIN", "AMQPLAIN"]).unwrap(),
            "PLAIN"
        );
    }

    #[test]
    fn negotiate_auth_mechanism_rejects_unsupported_choice() {
        assert!(negotiate_auth_mechanism("PLAIN", &["AMQPLAIN"]).is_err());
    }

    #[test]
    fn negotiate_numeric_picks_the_minimum_of_two_nonzero_values() {
        assert_eq!(negotiate_numeric(131_072, 4096), 4096);
    }

    #[test]
    fn negotiate_numeric_zero_means_no_preference() {
        assert_eq!(negotiate_numeric(0, 60), 60);
        assert_eq!(negotiate_numeric(60, 0), 60);
        assert_eq!(negotiate_numeric(0, 0), 0);
    }
}
