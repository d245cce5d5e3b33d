mod run;

use crate::provision::Settings;

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Provision { settings: Settings },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            subscription_id: "sub1".into(),
            tenant_id: "tenant1".into(),
            client_id: "client1".into(),
            client_secret: "secret".into(),
            location: "eastus".into(),
            resource_group: "rgX".into(),
            account: "acctX".into(),
            kind: "MongoDB".into(),
            allowed_ips: vec!["1.2.3.4".into()],
            databases: vec!["mydb1".into(), "mydb2".into()],
            throughput: 3000,
            strict_databases: false,
        }
    }

    #[test]
    fn test_action_debug() {
        let action = Action::Provision {
            settings: settings(),
        };
        let debug_str = format!("{action:?}");
        assert!(debug_str.contains("Provision"));
        assert!(debug_str.contains("acctX"));
    }

    #[test]
    fn test_action_carries_settings() {
        let action = Action::Provision {
            settings: settings(),
        };
        match action {
            Action::Provision { settings } => {
                assert_eq!(settings.databases.len(), 2);
                assert_eq!(settings.throughput, 3000);
            }
        }
    }
}
