use std::fmt;

use regex::Regex;

/// An scp-like git endpoint such as `git@github.com:user/repo`.
///
/// This is the address syntax `git clone` accepts without a scheme. A
/// string carrying an explicit `scheme://` prefix is not scp-like and is
/// rejected here; this tool only indexes repositories addressed the scp
/// way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScpEndpoint {
    protocol: String,
    user: String,
    host: String,
    port: u32,
    path: String,
}

/// Well-known default ports, used to suppress redundant port rendering.
fn default_port(protocol: &str) -> Option<u32> {
    match protocol.to_lowercase().as_str() {
        "http" => Some(80),
        "https" => Some(443),
        "git" => Some(9418),
        "ssh" => Some(22),
        _ => None,
    }
}

impl ScpEndpoint {
    /// Parses an scp-like endpoint, returning `None` for anything else.
    pub fn parse(endpoint: &str) -> Option<Self> {
        let scheme = Regex::new(r"^[^:]+://").unwrap();
        let scp_like = Regex::new(
            r"^(?:(?P<user>[^@]+)@)?(?P<host>[^:\s]+):(?:(?P<port>[0-9]{1,5})/)?(?P<path>[^\\].*)$",
        )
        .unwrap();

        if scheme.is_match(endpoint) {
            return None;
        }
        let captures = scp_like.captures(endpoint)?;

        let port = captures
            .name("port")
            .and_then(|port| port.as_str().parse().ok())
            .unwrap_or(22);

        Some(Self {
            protocol: "ssh".to_string(),
            user: captures
                .name("user")
                .map(|user| user.as_str().to_string())
                .unwrap_or_default(),
            host: captures.name("host")?.as_str().to_string(),
            port,
            path: captures.name("path")?.as_str().to_string(),
        })
    }

    /// The repository name, derived from the last path segment. This is
    /// the directory name `git clone` would pick.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(self.path.as_str())
    }

    /// The host part of the endpoint.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The repository path on the host.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ScpEndpoint {
    /// Renders the endpoint as the URL form git understands, e.g.
    /// `ssh://git@github.com/user/repo`. The port is omitted when it is
    /// the protocol's default.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.protocol.is_empty() {
            write!(f, "{}:", self.protocol)?;
        }
        if !self.protocol.is_empty() || !self.host.is_empty() || !self.user.is_empty() {
            write!(f, "//")?;
            if !self.user.is_empty() {
                write!(f, "{}@", self.user)?;
            }
            if !self.host.is_empty() {
                write!(f, "{}", self.host)?;
                if self.port != 0 && default_port(&self.protocol) != Some(self.port) {
                    write!(f, ":{}", self.port)?;
                }
            }
        }
        if !self.path.is_empty() && !self.path.starts_with('/') && !self.host.is_empty() {
            write!(f, "/")?;
        }
        write!(f, "{}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_host_path() {
        let endpoint = ScpEndpoint::parse("git@github.com:bassosimone/multirepo").unwrap();
        assert_eq!(endpoint.host(), "github.com");
        assert_eq!(endpoint.path(), "bassosimone/multirepo");
        assert_eq!(endpoint.name(), "multirepo");
        assert_eq!(endpoint.to_string(), "ssh://git@github.com/bassosimone/multirepo");
    }

    #[test]
    fn test_parse_host_path_without_user() {
        let endpoint = ScpEndpoint::parse("example.org:tools/scripts").unwrap();
        assert_eq!(endpoint.host(), "example.org");
        assert_eq!(endpoint.name(), "scripts");
        assert_eq!(endpoint.to_string(), "ssh://example.org/tools/scripts");
    }

    #[test]
    fn test_parse_with_explicit_port() {
        let endpoint = ScpEndpoint::parse("git@example.org:2222/srv/repo").unwrap();
        assert_eq!(endpoint.to_string(), "ssh://git@example.org:2222/srv/repo");
    }

    #[test]
    fn test_default_ssh_port_is_omitted() {
        let endpoint = ScpEndpoint::parse("git@example.org:22/srv/repo").unwrap();
        assert_eq!(endpoint.to_string(), "ssh://git@example.org/srv/repo");
    }

    #[test]
    fn test_scheme_urls_are_rejected() {
        assert_eq!(ScpEndpoint::parse("https://github.com/user/repo"), None);
        assert_eq!(ScpEndpoint::parse("ssh://git@github.com/user/repo"), None);
        assert_eq!(ScpEndpoint::parse("git://example.org/repo"), None);
    }

    #[test]
    fn test_non_endpoints_are_rejected() {
        assert_eq!(ScpEndpoint::parse("just-a-name"), None);
        assert_eq!(ScpEndpoint::parse(""), None);
    }

    #[test]
    fn test_name_of_single_segment_path() {
        let endpoint = ScpEndpoint::parse("git@github.com:standalone").unwrap();
        assert_eq!(endpoint.name(), "standalone");
    }

    #[test]
    fn test_suffix_is_preserved() {
        let endpoint = ScpEndpoint::parse("git@github.com:user/repo.git").unwrap();
        assert_eq!(endpoint.name(), "repo.git");
        assert_eq!(endpoint.to_string(), "ssh://git@github.com/user/repo.git");
    }
}
