use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("subscription-id")
                .env("COSMOSUP_SUBSCRIPTION_ID")
                .help("Azure subscription to provision into")
                .long("subscription-id")
                .short('s')
                .required(true),
        )
        .arg(
            Arg::new("tenant-id")
                .env("COSMOSUP_TENANT_ID")
                .help("AAD tenant of the service principal")
                .long("tenant-id")
                .short('t')
                .required(true),
        )
        .arg(
            Arg::new("client-id")
                .env("COSMOSUP_CLIENT_ID")
                .help("service principal application (client) ID")
                .long("client-id")
                .short('u')
                .required(true),
        )
        .arg(
            Arg::new("client-secret")
                .env("COSMOSUP_CLIENT_SECRET")
                .help("service principal client secret")
                .long("client-secret")
                .short('p')
                .required(true),
        )
        .arg(
            Arg::new("location")
                .env("COSMOSUP_LOCATION")
                .help("Azure region, e.g. eastus")
                .long("location")
                .short('l')
                .required(true),
        )
        .arg(
            Arg::new("resource-group")
                .env("COSMOSUP_RESOURCE_GROUP")
                .help("resource group to hold the account, created if missing")
                .long("resource-group")
                .short('g')
                .required(true),
        )
        .arg(
            Arg::new("account")
                .env("COSMOSUP_ACCOUNT")
                .help("Cosmos DB account name (globally unique)")
                .long("account")
                .short('a')
                .required(true),
        )
        .arg(
            Arg::new("allowed-ips")
                .env("COSMOSUP_ALLOWED_IPS")
                .help("comma-separated list of IPs allowed to reach the account")
                .long("allowed-ips")
                .short('i')
                .required(true),
        )
        .arg(
            Arg::new("kind")
                .default_value("MongoDB")
                .env("COSMOSUP_KIND")
                .help("account kind sent to the provider")
                .long("kind")
                .short('k'),
        )
        .arg(
            Arg::new("databases")
                .default_value("mydb1,mydb2")
                .env("COSMOSUP_DATABASES")
                .help("comma-separated database names to ensure")
                .long("databases")
                .short('d'),
        )
        .arg(
            Arg::new("throughput")
                .default_value("3000")
                .env("COSMOSUP_THROUGHPUT")
                .help("provisioned throughput in RU/s for each created database")
                .long("throughput")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("strict-databases")
                .action(ArgAction::SetTrue)
                .env("COSMOSUP_STRICT_DATABASES")
                .help("treat a database-creation failure as fatal instead of logging success")
                .long("strict-databases"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_args() -> Vec<&'static str> {
        vec![
            "cosmosup",
            "--subscription-id",
            "sub1",
            "--tenant-id",
            "tenant1",
            "--client-id",
            "client1",
            "--client-secret",
            "secret",
            "--location",
            "eastus",
            "--resource-group",
            "rgX",
            "--account",
            "acctX",
            "--allowed-ips",
            "1.2.3.4",
        ]
    }

    #[test]
    fn test_new() {
        let cmd = new();
        assert_eq!(cmd.get_name(), "cosmosup");
        assert_eq!(
            cmd.get_about().unwrap().to_string(),
            env!("CARGO_PKG_DESCRIPTION")
        );
        assert_eq!(
            cmd.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_new_no_args() {
        let cmd = new();
        let matches = cmd.try_get_matches_from(vec!["cosmosup"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_new_unknown_flag() {
        let cmd = new();
        let mut args = required_args();
        args.push("--no-such-flag");
        let matches = cmd.try_get_matches_from(args);
        assert!(matches.is_err());
    }

    #[test]
    fn test_new_defaults() {
        let cmd = new();
        let matches = cmd.try_get_matches_from(required_args());
        assert!(matches.is_ok());

        let m = matches.unwrap();
        assert_eq!(m.get_one("kind"), Some(&String::from("MongoDB")));
        assert_eq!(m.get_one("databases"), Some(&String::from("mydb1,mydb2")));
        assert_eq!(m.get_one::<u32>("throughput").copied(), Some(3000));
        assert!(!m.get_flag("strict-databases"));
    }

    #[test]
    fn test_new_args_full() {
        let cmd = new();
        let mut args = required_args();
        args.extend([
            "--kind",
            "MongoDB",
            "--databases",
            "orders,sessions",
            "--throughput",
            "400",
            "--strict-databases",
        ]);
        let matches = cmd.try_get_matches_from(args);
        assert!(matches.is_ok());

        let m = matches.unwrap();
        assert_eq!(m.get_one("subscription-id"), Some(&String::from("sub1")));
        assert_eq!(m.get_one("account"), Some(&String::from("acctX")));
        assert_eq!(m.get_one("databases"), Some(&String::from("orders,sessions")));
        assert_eq!(m.get_one::<u32>("throughput").copied(), Some(400));
        assert!(m.get_flag("strict-databases"));
    }
}
