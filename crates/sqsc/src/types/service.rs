//! Service records

use super::batch::{DockerDevice, Limits};
use super::volume::VolumeMount;
use serde::{Deserialize, Deserializer, Serialize};

/// An environment variable of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    /// Variable name
    pub key: String,
    /// Variable value
    pub value: String,
    /// Set by the control plane rather than the user
    #[serde(default)]
    pub predefined: bool,
}

/// A service container of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Container id, used by the `/containers/{id}` routes
    #[serde(rename = "container_id")]
    pub id: u64,
    /// Service name
    pub name: String,
    /// Command, joined with spaces
    #[serde(default, deserialize_with = "command_line")]
    pub run_command: String,
    /// Entrypoint override
    #[serde(default)]
    pub entrypoint: String,
    /// Running instances
    #[serde(default)]
    pub running: u32,
    /// Requested instances
    #[serde(default)]
    pub size: u32,
    /// Port exposed through the load balancer
    #[serde(default)]
    pub web_port: u32,
    /// Resource limits
    #[serde(default)]
    pub limits: Limits,
    /// User environment
    #[serde(default)]
    pub custom_environment: Vec<EnvVar>,
    /// Extra Linux capabilities
    #[serde(default)]
    pub docker_capabilities: Vec<String>,
    /// Host devices
    #[serde(default)]
    pub docker_devices: Vec<DockerDevice>,
    /// Restarted automatically
    #[serde(default)]
    pub auto_start: bool,
    /// Mounted volumes
    #[serde(default)]
    pub volumes: Vec<VolumeMount>,
}

/// The control plane sends the command as an argv array; older releases sent
/// a plain string.
fn command_line<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Command {
        Argv(Vec<String>),
        Line(String),
        Null(()),
    }

    Ok(match Command::deserialize(deserializer)? {
        Command::Argv(argv) => argv.join(" "),
        Command::Line(line) => line,
        Command::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"["bundle","exec","puma"]"#, "bundle exec puma")]
    #[case(r#""./run.sh""#, "./run.sh")]
    #[case("null", "")]
    fn test_run_command_shapes(#[case] raw: &str, #[case] expected: &str) {
        let json = format!(r#"{{"container_id":5,"name":"web","run_command":{raw}}}"#);
        let service: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(service.id, 5);
        assert_eq!(service.run_command, expected);
    }
}
