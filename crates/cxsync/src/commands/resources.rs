//! Single-resource handlers: `vlan`, `interface`, `l2`, `l3`,
//! `vlan-interface`.

use cxsync_core::engine;
use cxsync_core::{
    AdminState, Interface, Outcome, SwitchClient, SwitchResource, Tracked, Vlan, VlanInterface,
};

use crate::cli::{
    AdminArg, GlobalOpts, InterfaceArgs, InterfaceCommand, PortArgs, PortCommand, VlanArgs,
    VlanCommand, VlanInterfaceArgs, VlanInterfaceCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

impl From<AdminArg> for AdminState {
    fn from(arg: AdminArg) -> Self {
        match arg {
            AdminArg::Up => Self::Up,
            AdminArg::Down => Self::Down,
        }
    }
}

// ── Generic steps ───────────────────────────────────────────────────

async fn show<R: SwitchResource>(
    client: &SwitchClient,
    key: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let tracked = engine::get::<R>(client, key).await?;
    let out = output::render_single(&global.output, &tracked.state, output::detail, |r| {
        r.id()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn remove<R: SwitchResource>(
    client: &SwitchClient,
    key: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let target = R::from_key(key)?;
    let label = format!("{} {}", util::kind_name(R::KIND), target.key());
    if !util::confirm(&format!("Delete {label}?"), global, &format!("delete {label}"))? {
        return Ok(());
    }

    let outcome = engine::delete(client, Tracked::bound(target)).await;
    util::finish(&label, &outcome.diagnostics, global)?;
    if !global.quiet {
        eprintln!("✓ Deleted {label}");
    }
    Ok(())
}

async fn set<R: SwitchResource>(
    client: &SwitchClient,
    desired: R,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let label = format!("{} {}", util::kind_name(R::KIND), desired.key());
    let outcome: Outcome<R> = engine::apply(client, &desired).await;
    util::finish(&label, &outcome.diagnostics, global)?;

    let out = output::render_single(&global.output, &outcome.tracked.state, output::detail, |r| {
        r.id()
    });
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!("✓ {label}: {}", outcome.action);
    }
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn vlan(
    args: VlanArgs,
    client: &SwitchClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VlanCommand::Get { id } => show::<Vlan>(client, &id, global).await,
        VlanCommand::Set {
            id,
            name,
            description,
            admin,
        } => {
            let desired = Vlan {
                vlan_id: id,
                name,
                description,
                admin_state: admin.into(),
            };
            set(client, desired, global).await
        }
        VlanCommand::Delete { id } => remove::<Vlan>(client, &id, global).await,
    }
}

pub async fn interface(
    args: InterfaceArgs,
    client: &SwitchClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        InterfaceCommand::Get { name } => show::<Interface>(client, &name, global).await,
        InterfaceCommand::Set {
            name,
            description,
            admin,
        } => {
            let desired = Interface {
                name,
                description,
                admin_state: admin.into(),
            };
            set(client, desired, global).await
        }
        InterfaceCommand::Delete { name } => remove::<Interface>(client, &name, global).await,
    }
}

/// `l2` and `l3`: the same get/delete pair over either port kind.
pub async fn port<R: SwitchResource>(
    args: PortArgs,
    client: &SwitchClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PortCommand::Get { name } => show::<R>(client, &name, global).await,
        PortCommand::Delete { name } => remove::<R>(client, &name, global).await,
    }
}

pub async fn vlan_interface(
    args: VlanInterfaceArgs,
    client: &SwitchClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        VlanInterfaceCommand::Get { id } => show::<VlanInterface>(client, &id, global).await,
        VlanInterfaceCommand::Delete { id } => remove::<VlanInterface>(client, &id, global).await,
    }
}
