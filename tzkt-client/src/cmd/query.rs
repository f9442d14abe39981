//! `tzkt query` command — run one catalog entry.

use tzkt_client::{
    ContractsParams, CycleFilter, IndexerClient, NetworkId, OperationsParams, QueryKind,
    QueryString, RewardsParams, SortDirection,
};

use super::{QueryArgs, SortArg, print_json};

impl From<SortArg> for SortDirection {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => Self::Asc,
            SortArg::Desc => Self::Desc,
        }
    }
}

fn extra(args: &QueryArgs) -> QueryString {
    args.params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

fn operations_params(args: &QueryArgs) -> OperationsParams {
    OperationsParams {
        address: args.address.clone(),
        kind: args.kind.clone(),
        quote: args.quote.clone(),
        from: args.from.clone(),
        to: args.to.clone(),
        limit: args.limit,
        offset: args.offset,
        last_id: None,
        extra: extra(args),
    }
}

fn rewards_params(args: &QueryArgs) -> RewardsParams {
    RewardsParams {
        address: args.address.clone(),
        cycle: CycleFilter {
            gte: args.cycle_gte,
            lte: args.cycle_lte,
            in_: args.cycle_in.clone(),
            ni: args.cycle_ni.clone(),
            ..CycleFilter::default()
        },
        sort: args.sort.map(Into::into),
        quote: args.quote.clone(),
        limit: args.limit,
        offset: args.offset,
        extra: extra(args),
    }
}

/// Execute the `query` command.
///
/// Unlike `fetch`, an unknown network is an error here.
///
/// # Errors
///
/// Returns an error if the query or network is unknown, or the request fails.
pub async fn run(client: &IndexerClient, args: &QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind: QueryKind = args.query.parse()?;
    let network: NetworkId = args.network.parse()?;
    let params = operations_params(args);

    match kind {
        QueryKind::Operations => print_json(&client.operations(network, &params).await?)?,
        QueryKind::Fa12Transfers => print_json(&client.fa12_transfers(network, &params).await?)?,
        QueryKind::Fa2Transfers => print_json(&client.fa2_transfers(network, &params).await?)?,
        QueryKind::TokenBalances => print_json(&client.token_balances(network, &params).await?)?,
        QueryKind::NftBalances => print_json(&client.nft_balances(network, &params).await?)?,
        QueryKind::TokenTransfers => {
            print_json(&client.token_transfers(network, &params).await?)?;
        }
        QueryKind::TokenTransfersCount => {
            print_json(&client.token_transfers_count(network, &params).await?)?;
        }
        QueryKind::TokenBalancesCount => {
            print_json(&client.token_balances_count(network, &params).await?)?;
        }
        QueryKind::NftBalancesCount => {
            print_json(&client.nft_balances_count(network, &params).await?)?;
        }
        QueryKind::Account => print_json(&client.account(network, &params).await?)?,
        QueryKind::RelatedContracts => {
            let params = ContractsParams::new(args.address.as_str());
            print_json(&client.related_contracts(network, &params).await?)?;
        }
        QueryKind::DelegatorRewards => {
            print_json(&client.delegator_rewards(network, &rewards_params(args)).await?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cmd::{Cli, Commands};

    fn query_args(argv: &[&str]) -> QueryArgs {
        let cli = Cli::parse_from(["tzkt", "query"].iter().chain(argv));
        match cli.command {
            Commands::Query(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rewards_args_build_cycle_filter_and_sort() {
        let args = query_args(&[
            "delegator-rewards", "-a", "tz1a", "--cycle-gte", "10", "--cycle-lte", "20", "--sort",
            "asc",
        ]);
        let params = rewards_params(&args);
        assert_eq!(params.cycle.gte, Some(10));
        assert_eq!(params.cycle.lte, Some(20));
        assert_eq!(params.cycle.in_, None);
        assert_eq!(params.sort, Some(SortDirection::Asc));
    }

    #[test]
    fn rewards_args_accept_cycle_lists() {
        let args = query_args(&[
            "delegator-rewards", "-a", "tz1a", "--cycle-in", "500,501", "--cycle-ni", "7",
        ]);
        let params = rewards_params(&args);
        assert_eq!(params.cycle.in_, Some(vec![500, 501]));
        assert_eq!(params.cycle.ni, Some(vec![7]));
        assert_eq!(params.sort, None);
    }

    #[test]
    fn extra_params_reach_operations_params() {
        let args = query_args(&["operations", "-a", "tz1a", "-P", "sort.desc=id", "--limit", "5"]);
        let params = operations_params(&args);
        assert_eq!(params.extra.get_str("sort.desc").as_deref(), Some("id"));
        assert_eq!(params.limit, Some(5));
    }
}
