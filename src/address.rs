//! Hub address parsing.
//!
//! Accepted form: `[protocol://]host[:port][/[?kp=[SHA256/]<keyprint>]]`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::hash::Keyprint;
use crate::session::HubId;
use crate::vars::VarStore;

pub const DEFAULT_PORT: u16 = 411;

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([A-Za-z]+)://)?([^\s:/<>()\[\]]+)(?::([0-9]{1,5}))?(?:/(?:\?kp=(?:SHA256/)?([A-Za-z2-7]{52}))?)?$",
    )
    .expect("address regex is valid")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid hub address.")]
    Format,
    #[error("Keyprints are only valid for adcs:// or nmdcs:// addresses.")]
    KeyprintProtocol,
}

/// Hub protocol, named after its URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    /// Plain NMDC (`dchub://`).
    #[default]
    Dchub,
    Nmdc,
    /// NMDC over TLS.
    Nmdcs,
    Adc,
    /// ADC over TLS.
    Adcs,
}

impl Protocol {
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "dchub" => Some(Self::Dchub),
            "nmdc" => Some(Self::Nmdc),
            "nmdcs" => Some(Self::Nmdcs),
            "adc" => Some(Self::Adc),
            "adcs" => Some(Self::Adcs),
            _ => None,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Dchub => "dchub",
            Self::Nmdc => "nmdc",
            Self::Nmdcs => "nmdcs",
            Self::Adc => "adc",
            Self::Adcs => "adcs",
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Nmdcs | Self::Adcs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubAddress {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub keyprint: Option<Keyprint>,
}

impl HubAddress {
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let caps = ADDRESS_RE
            .captures(input.trim())
            .ok_or(AddressError::Format)?;

        let protocol = match caps.get(1) {
            Some(m) => Protocol::from_scheme(m.as_str()).ok_or(AddressError::Format)?,
            None => Protocol::default(),
        };
        let host = caps[2].to_string();
        let port = match caps.get(3) {
            Some(m) => match m.as_str().parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => return Err(AddressError::Format),
            },
            None => DEFAULT_PORT,
        };
        let keyprint = match caps.get(4) {
            Some(m) => {
                if !protocol.is_tls() {
                    return Err(AddressError::KeyprintProtocol);
                }
                Some(m.as_str().parse().map_err(|_| AddressError::Format)?)
            }
            None => None,
        };

        Ok(Self {
            protocol,
            host,
            port,
            keyprint,
        })
    }

    /// Canonical `protocol://host:port/` form, without the keyprint.
    pub fn canonical(&self) -> String {
        format!("{}://{}:{}/", self.protocol.scheme(), self.host, self.port)
    }
}

impl fmt::Display for HubAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())?;
        if let Some(kp) = &self.keyprint {
            write!(f, "?kp=SHA256/{}", kp)?;
        }
        Ok(())
    }
}

/// Persist an address for a hub.
///
/// A keyprint pinned for a different endpoint is forgotten unless the new
/// address pins one itself.
pub fn store_address(vars: &mut VarStore, hub: HubId, addr: &HubAddress) {
    let canonical = addr.canonical();
    let previous = vars.get_raw(hub, "hubaddr");

    if previous.as_deref() != Some(canonical.as_str()) && addr.keyprint.is_none() {
        if vars.get_raw(hub, "hubkp").is_some() {
            tracing::info!(hub, "hub address changed, dropping pinned keyprint");
        }
        vars.unset_raw(hub, "hubkp");
    }
    vars.set_raw(hub, "hubaddr", &canonical);
    if let Some(kp) = &addr.keyprint {
        vars.set_raw(hub, "hubkp", &kp.to_string());
    }
}

/// Reconstruct the stored address of a hub, including a pinned keyprint.
pub fn stored_address(vars: &VarStore, hub: HubId) -> Option<HubAddress> {
    let raw = vars.get_raw(hub, "hubaddr")?;
    let mut addr = HubAddress::parse(&raw).ok()?;
    if addr.protocol.is_tls() {
        addr.keyprint = vars.get_raw(hub, "hubkp").and_then(|kp| kp.parse().ok());
    }
    Some(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::base32_encode;

    fn keyprint_token() -> String {
        base32_encode(&[0xab; 32])
    }

    #[test]
    fn bare_host_uses_defaults() {
        let addr = HubAddress::parse("example.com").unwrap();
        assert_eq!(addr.protocol, Protocol::Dchub);
        assert_eq!(addr.host, "example.com");
        assert_eq!(addr.port, 411);
        assert_eq!(addr.keyprint, None);
        assert_eq!(addr.canonical(), "dchub://example.com:411/");
    }

    #[test]
    fn tls_address_with_keyprint() {
        let token = keyprint_token();
        let addr = HubAddress::parse(&format!("adcs://x.example:5000/?kp={}", token)).unwrap();
        assert_eq!(addr.protocol, Protocol::Adcs);
        assert_eq!(addr.host, "x.example");
        assert_eq!(addr.port, 5000);
        assert_eq!(addr.keyprint.unwrap().0, [0xab; 32]);
    }

    #[test]
    fn keyprint_accepts_sha256_prefix() {
        let token = keyprint_token();
        let addr =
            HubAddress::parse(&format!("nmdcs://hub.example/?kp=SHA256/{}", token)).unwrap();
        assert_eq!(addr.protocol, Protocol::Nmdcs);
        assert!(addr.keyprint.is_some());
        assert_eq!(
            addr.to_string(),
            format!("nmdcs://hub.example:411/?kp=SHA256/{}", token)
        );
    }

    #[test]
    fn keyprint_on_plain_protocol_is_rejected() {
        let token = keyprint_token();
        assert_eq!(
            HubAddress::parse(&format!("dchub://x.example:5000/?kp={}", token)),
            Err(AddressError::KeyprintProtocol)
        );
        assert_eq!(
            HubAddress::parse(&format!("x.example/?kp={}", token)),
            Err(AddressError::KeyprintProtocol)
        );
    }

    #[test]
    fn malformed_addresses() {
        for input in [
            "",
            "ftp://example.com",
            "exa mple.com",
            "[::1]:411",
            "example.com:0",
            "example.com:70000",
            "example.com:abc",
            "adcs://x.example/?kp=tooshort",
        ] {
            assert_eq!(HubAddress::parse(input), Err(AddressError::Format), "{input}");
        }
    }

    #[test]
    fn trailing_slash_is_optional() {
        let a = HubAddress::parse("adc://hub.example:1511/").unwrap();
        let b = HubAddress::parse("ADC://hub.example:1511").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn changing_endpoint_drops_pinned_keyprint() {
        let mut vars = VarStore::default();
        let token = keyprint_token();
        let pinned = HubAddress::parse(&format!("adcs://a.example/?kp={}", token)).unwrap();
        store_address(&mut vars, 1, &pinned);
        assert_eq!(vars.get_raw(1, "hubkp"), Some(token.clone()));

        // Same endpoint without keyprint keeps the pin.
        store_address(&mut vars, 1, &HubAddress::parse("adcs://a.example:411").unwrap());
        assert_eq!(vars.get_raw(1, "hubkp"), Some(token));
        assert_eq!(stored_address(&vars, 1).unwrap().keyprint, pinned.keyprint);

        // New endpoint forgets it.
        store_address(&mut vars, 1, &HubAddress::parse("adcs://b.example").unwrap());
        assert_eq!(vars.get_raw(1, "hubkp"), None);
        assert_eq!(vars.get_raw(1, "hubaddr").unwrap(), "adcs://b.example:411/");
    }

    #[test]
    fn new_endpoint_with_keyprint_repins() {
        let mut vars = VarStore::default();
        store_address(
            &mut vars,
            3,
            &HubAddress::parse(&format!("adcs://a.example/?kp={}", keyprint_token())).unwrap(),
        );
        let other = base32_encode(&[1u8; 32]);
        store_address(
            &mut vars,
            3,
            &HubAddress::parse(&format!("adcs://b.example/?kp={}", other)).unwrap(),
        );
        assert_eq!(vars.get_raw(3, "hubkp"), Some(other));
    }
}
