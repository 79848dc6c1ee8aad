//! タスクファイル (fabric.kdl) のパース
//!
//! ```kdl
//! controller {
//!     host "apic1.example.com"
//!     username "admin"
//!     validate-certs #false
//! }
//!
//! epg-contract-binding "web provides http" {
//!     tenant "prod"
//!     app-profile "shop"
//!     epg "web"
//!     contract "http"
//!     contract-type "provider"
//!     provider-match "at_least_one"
//!     state "present"
//! }
//!
//! fc-policy "fc-np" {
//!     port-mode "np"
//! }
//! ```

use crate::error::{ConfigError, Result};
use crate::settings::ControllerSettings;
use fabricflow_aci::{DesiredState, EpgContractBinding, FabricError, FcPolicy, Task};
use kdl::{KdlDocument, KdlNode, KdlValue};
use std::path::Path;

/// Parsed contents of a task file
#[derive(Debug, Clone, Default)]
pub struct TaskFile {
    pub controller: ControllerSettings,
    pub tasks: Vec<Task>,
}

/// タスクファイルを読み込んでパース
pub fn load_task_file(path: &Path) -> Result<TaskFile> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let file = parse_task_file(&content)?;
    tracing::debug!("Loaded {} task(s) from {}", file.tasks.len(), path.display());
    Ok(file)
}

/// KDL文字列をパース
pub fn parse_task_file(content: &str) -> Result<TaskFile> {
    let doc: KdlDocument = content.parse()?;
    let mut file = TaskFile::default();
    let mut seen_controller = false;

    for node in doc.nodes() {
        match normalize(node.name().value()).as_str() {
            "controller" => {
                if seen_controller {
                    return Err(ConfigError::invalid(
                        "controller",
                        "controller ブロックは1つまでです",
                    ));
                }
                seen_controller = true;
                file.controller = parse_controller(node)?;
            }
            "epg_contract_binding" => file.tasks.push(parse_epg_contract_binding(node)?),
            "fc_policy" => file.tasks.push(parse_fc_policy(node)?),
            other => {
                return Err(ConfigError::invalid(
                    other,
                    "未知のノードです (controller, epg-contract-binding, fc-policy のいずれか)",
                ));
            }
        }
    }

    Ok(file)
}

/// controller ノードをパース
fn parse_controller(node: &KdlNode) -> Result<ControllerSettings> {
    let mut settings = ControllerSettings::default();

    for child in child_nodes(node) {
        let key = normalize(child.name().value());
        match key.as_str() {
            "host" | "hostname" => settings.host = Some(string_arg(child, "controller")?),
            "port" => {
                let port = integer_arg(child, "controller")?;
                settings.port = Some(u16::try_from(port).map_err(|_| {
                    ConfigError::invalid("controller", format!("無効なポート番号: {port}"))
                })?);
            }
            "username" | "user" => settings.username = Some(string_arg(child, "controller")?),
            "password" => settings.password = Some(string_arg(child, "controller")?),
            "protocol" => settings.protocol = Some(string_arg(child, "controller")?),
            "validate_certs" => settings.validate_certs = Some(bool_arg(child, "controller")?),
            "timeout" => {
                let timeout = integer_arg(child, "controller")?;
                settings.timeout_secs = Some(u64::try_from(timeout).map_err(|_| {
                    ConfigError::invalid("controller", format!("無効なタイムアウト: {timeout}"))
                })?);
            }
            other => {
                return Err(ConfigError::invalid(
                    "controller",
                    format!("未知の設定項目: {other}"),
                ));
            }
        }
    }

    Ok(settings)
}

/// epg-contract-binding ノードをパース
fn parse_epg_contract_binding(node: &KdlNode) -> Result<Task> {
    let label = first_arg(node).and_then(KdlValue::as_string).map(str::to_string);
    let context = label.clone().unwrap_or_else(|| "epg-contract-binding".to_string());

    let mut contract_type = None;
    let mut state = None;
    let mut fields: Vec<(&'static str, String)> = Vec::new();

    for child in child_nodes(node) {
        let key = normalize(child.name().value());
        let value = string_arg(child, &context)?;
        match key.as_str() {
            "tenant" | "tenant_name" => fields.push(("tenant", value)),
            "app_profile" | "app_profile_name" => fields.push(("app_profile", value)),
            "epg" | "epg_name" => fields.push(("epg", value)),
            "contract" | "contract_name" => fields.push(("contract", value)),
            "priority" => fields.push(("priority", value)),
            "provider_match" => fields.push(("provider_match", value)),
            "contract_type" => contract_type = Some(value),
            "state" => state = Some(value),
            other => {
                return Err(ConfigError::invalid(
                    context,
                    format!("未知の設定項目: {other}"),
                ));
            }
        }
    }

    let contract_type = contract_type
        .ok_or_else(|| ConfigError::invalid(&context, "contract-type は必須です"))?;

    let mut builder = EpgContractBinding::builder(contract_type);
    for (field, value) in fields {
        builder = match field {
            "tenant" => builder.tenant(value),
            "app_profile" => builder.app_profile(value),
            "epg" => builder.epg(value),
            "contract" => builder.contract(value),
            "priority" => builder.priority(value),
            _ => builder.provider_match(value),
        };
    }

    let binding = builder.build().map_err(|e| task_error(&context, e))?;
    let state = parse_state(state, &context)?;
    Ok(with_label(Task::new(binding, state), label))
}

/// fc-policy ノードをパース
fn parse_fc_policy(node: &KdlNode) -> Result<Task> {
    let mut builder = FcPolicy::builder();
    let mut name = first_arg(node).and_then(KdlValue::as_string).map(str::to_string);
    let mut state = None;
    let context = name.clone().unwrap_or_else(|| "fc-policy".to_string());

    for child in child_nodes(node) {
        let key = normalize(child.name().value());
        let value = string_arg(child, &context)?;
        match key.as_str() {
            "fc_policy" | "name" => name = Some(value),
            "description" | "descr" => builder = builder.description(value),
            "port_mode" => builder = builder.port_mode(value),
            "state" => state = Some(value),
            other => {
                return Err(ConfigError::invalid(
                    context,
                    format!("未知の設定項目: {other}"),
                ));
            }
        }
    }

    if let Some(name) = &name {
        builder = builder.name(name.clone());
    }
    let policy = builder.build().map_err(|e| task_error(&context, e))?;
    let state = parse_state(state, &context)?;
    Ok(with_label(Task::new(policy, state), name))
}

fn parse_state(state: Option<String>, context: &str) -> Result<DesiredState> {
    match state {
        Some(state) => state.parse().map_err(|e| task_error(context, e)),
        None => Ok(DesiredState::default()),
    }
}

fn with_label(task: Task, label: Option<String>) -> Task {
    match label {
        Some(label) => task.with_name(label),
        None => task,
    }
}

fn task_error(context: &str, source: FabricError) -> ConfigError {
    ConfigError::Task {
        node: context.to_string(),
        source,
    }
}

/// `app-profile` と `app_profile` を同一視する
fn normalize(name: &str) -> String {
    name.replace('-', "_")
}

fn child_nodes(node: &KdlNode) -> impl Iterator<Item = &KdlNode> {
    node.children().into_iter().flat_map(|doc| doc.nodes())
}

fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

fn string_arg(node: &KdlNode, context: &str) -> Result<String> {
    match first_arg(node) {
        Some(value) => {
            if let Some(s) = value.as_string() {
                Ok(s.to_string())
            } else if let Some(i) = value.as_integer() {
                Ok(i.to_string())
            } else {
                Err(ConfigError::invalid(
                    context,
                    format!("{} には文字列を指定してください", node.name().value()),
                ))
            }
        }
        None => Err(ConfigError::invalid(
            context,
            format!("{} に値がありません", node.name().value()),
        )),
    }
}

fn integer_arg(node: &KdlNode, context: &str) -> Result<i128> {
    first_arg(node)
        .and_then(KdlValue::as_integer)
        .ok_or_else(|| {
            ConfigError::invalid(
                context,
                format!("{} には整数を指定してください", node.name().value()),
            )
        })
}

fn bool_arg(node: &KdlNode, context: &str) -> Result<bool> {
    first_arg(node).and_then(KdlValue::as_bool).ok_or_else(|| {
        ConfigError::invalid(
            context,
            format!("{} には #true / #false を指定してください", node.name().value()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabricflow_aci::{ContractRole, PortMode, Resource, ResourceRequest};

    #[test]
    fn test_parse_full_file() {
        let file = parse_task_file(
            r#"
            controller {
                host "apic1.example.com"
                port 8443
                username "ops"
                validate-certs #false
                timeout 10
            }

            epg-contract-binding "web provides http" {
                tenant "prod"
                app-profile "shop"
                epg "web"
                contract "http"
                contract-type "provider"
                provider-match "at_least_one"
                priority "level2"
            }

            fc-policy "fc-np" {
                description "np uplinks"
                port-mode "np"
                state "absent"
            }
            "#,
        )
        .unwrap();

        assert_eq!(file.controller.host.as_deref(), Some("apic1.example.com"));
        assert_eq!(file.controller.port, Some(8443));
        assert_eq!(file.controller.username.as_deref(), Some("ops"));
        assert_eq!(file.controller.validate_certs, Some(false));
        assert_eq!(file.controller.timeout_secs, Some(10));

        assert_eq!(file.tasks.len(), 2);

        let binding = &file.tasks[0];
        assert_eq!(binding.name.as_deref(), Some("web provides http"));
        assert_eq!(binding.state, DesiredState::Present);
        match &binding.resource {
            ResourceRequest::EpgContractBinding(b) => {
                assert_eq!(b.role(), ContractRole::Provider);
                assert_eq!(b.contract(), Some("http"));
            }
            other => panic!("unexpected resource: {other:?}"),
        }
        assert_eq!(
            binding.resolve().unwrap().path,
            "api/mo/uni/tn-prod/ap-shop/epg-web/rsprov-http.json"
        );

        let policy = &file.tasks[1];
        assert_eq!(policy.label(), "fc-np");
        assert_eq!(policy.state, DesiredState::Absent);
        match &policy.resource {
            ResourceRequest::FcPolicy(p) => {
                assert_eq!(p.name(), Some("fc-np"));
                assert_eq!(p.port_mode(), Some(PortMode::Np));
            }
            other => panic!("unexpected resource: {other:?}"),
        }
    }

    #[test]
    fn test_aliases_are_accepted() {
        let file = parse_task_file(
            r#"
            epg-contract-binding {
                tenant_name "T1"
                app_profile_name "P1"
                epg-name "G1"
                contract-name "C1"
                contract-type "consumer"
            }
            fc-policy {
                name "fc1"
                descr "legacy spelling"
            }
            "#,
        )
        .unwrap();

        assert_eq!(
            file.tasks[0].resolve().unwrap().path,
            "api/mo/uni/tn-T1/ap-P1/epg-G1/rscons-C1.json"
        );
        assert_eq!(file.tasks[0].label(), "epg-contract-binding");
        assert_eq!(
            file.tasks[1].resource.as_resource().class_config()[1],
            ("descr", Some("legacy spelling".to_string()))
        );
    }

    #[test]
    fn test_query_without_name() {
        let file = parse_task_file(r#"fc-policy { state "query"; }"#).unwrap();
        let target = file.tasks[0].resolve().unwrap();
        assert_eq!(target.path, "api/class/fcIfPol.json");
        assert_eq!(file.tasks[0].label(), "fc-policy");
    }

    /// 名前を子ノードで指定した fc-policy もその名前で表示される
    #[test]
    fn test_fc_policy_label_from_name_child() {
        let file = parse_task_file(r#"fc-policy { name "fc-f"; port-mode "f"; }"#).unwrap();
        assert_eq!(file.tasks[0].label(), "fc-f");
        assert_eq!(file.tasks[0].name.as_deref(), Some("fc-f"));
    }

    #[test]
    fn test_contract_type_required() {
        let err = parse_task_file(r#"epg-contract-binding { tenant "T1"; }"#).unwrap_err();
        match err {
            ConfigError::InvalidTask { message, .. } => assert!(message.contains("contract-type")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_provider_match_on_consumer_is_rejected() {
        let err = parse_task_file(
            r#"
            epg-contract-binding "bad" {
                contract-type "consumer"
                provider-match "all"
            }
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Task { node, source } => {
                assert_eq!(node, "bad");
                assert!(matches!(source, FabricError::ConstraintViolation(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_state() {
        let err = parse_task_file(r#"fc-policy "a" { state "deleted"; }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Task {
                source: FabricError::InvalidParameter { field: "state", .. },
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_nodes_are_rejected() {
        assert!(matches!(
            parse_task_file(r#"bridge-domain "bd1""#),
            Err(ConfigError::InvalidTask { .. })
        ));
        assert!(matches!(
            parse_task_file(r#"fc-policy "a" { speed "8G"; }"#),
            Err(ConfigError::InvalidTask { .. })
        ));
        assert!(matches!(
            parse_task_file("controller {}\ncontroller {}"),
            Err(ConfigError::InvalidTask { .. })
        ));
    }

    #[test]
    fn test_kdl_syntax_error() {
        assert!(matches!(
            parse_task_file("fc-policy {"),
            Err(ConfigError::KdlParse(_))
        ));
    }

    #[test]
    fn test_load_task_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("fabric.kdl");
        std::fs::write(&path, r#"fc-policy "fc1" { port-mode "f"; }"#).unwrap();

        let file = load_task_file(&path).unwrap();
        assert_eq!(file.tasks.len(), 1);

        let missing = load_task_file(&temp_dir.path().join("nope.kdl")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
