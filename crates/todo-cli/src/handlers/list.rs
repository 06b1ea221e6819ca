use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;

pub fn handle(ctx: &mut CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Create { name } => {
            let result = ctx.store_mut().create_list(&name);
            output::output_mutation(result, || ctx.dashboard());
        }
        ListAction::List => {
            output::output_list(ctx.store().lists().to_vec());
        }
        ListAction::Get { id } => match ctx.store().get_list(&id) {
            Some(list) => output::output_success(list),
            None => output::output_error(&format!("List not found: {}", id)),
        },
        ListAction::Show { id } => {
            if let Err(e) = ctx.session.open_list(&id) {
                output::output_error(&e.to_string());
            }
            output::output_success(ctx.session.view());
        }
        ListAction::Rename { id, name } => {
            let result = ctx.store_mut().rename_list(&id, &name);
            output::output_mutation(result, || ctx.view_of(&id));
        }
        ListAction::Delete { id } => {
            let result = ctx
                .session
                .delete_list(&id)
                .map(|list| serde_json::json!({"deleted": list.id}));
            output::output_mutation(result, || ctx.dashboard());
        }
    }
    Ok(())
}
