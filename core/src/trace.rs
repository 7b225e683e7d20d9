//! # Diagnostic Exchange
//!
//! The probe speaks one fixed plaintext HTTP exchange against the target
//! network's trace endpoint. The request bytes are part of the contract and
//! must not vary; the response is parsed best-effort for two tokens:
//!
//! * `uag=<agent>`: the endpoint echoes the User-Agent we sent. A missing
//!   echo means some middlebox answered instead of the target network, so
//!   the candidate is discarded.
//! * `colo=<CODE>`: the point-of-presence code of the answering site.

/// Path of the well-known diagnostic endpoint.
pub const TRACE_PATH: &str = "/cdn-cgi/trace";

/// Identifying User-Agent; its echo in the body proves we reached the
/// target network and not a transparent proxy.
pub const PROBE_AGENT: &str = "Mozilla/5.0";

/// Builds the fixed probe request for one candidate address.
pub fn build_request(host: &str) -> String {
    format!(
        "GET {TRACE_PATH} HTTP/1.1\r\nHost: {host}\r\nUser-Agent: {PROBE_AGENT}\r\nConnection: close\r\n\r\n"
    )
}

/// Extracts the PoP code from a trace response.
///
/// Returns `None` unless the response both echoes our User-Agent and
/// carries a non-empty uppercase `colo=` token.
pub fn parse_pop_code(response: &str) -> Option<String> {
    if !echoes_agent(response) {
        return None;
    }
    extract_colo(response)
}

fn echoes_agent(response: &str) -> bool {
    // The trace body is key=value lines; a literal scan is enough.
    response.contains(&format!("uag={PROBE_AGENT}"))
}

fn extract_colo(response: &str) -> Option<String> {
    let rest = &response[response.find("colo=")? + "colo=".len()..];
    let code: String = rest.chars().take_while(char::is_ascii_uppercase).collect();
    if code.is_empty() { None } else { Some(code) }
}
