use crate::cli::TaskAction;
use crate::context::CliContext;
use crate::output;

pub fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add { list, text } => {
            let result = ctx.store_mut().add_task(&list, &text);
            output::output_mutation(result, || ctx.view_of(&list));
        }
        TaskAction::List { list } => match ctx.store().get_list(&list) {
            Some(found) => output::output_list(found.tasks.clone()),
            None => output::output_error(&format!("List not found: {}", list)),
        },
        TaskAction::Toggle { list, id } => {
            let result = ctx.store_mut().toggle_task(&list, &id);
            output::output_mutation(result, || ctx.view_of(&list));
        }
        TaskAction::Delete { list, id } => {
            let result = ctx
                .store_mut()
                .delete_task(&list, &id)
                .map(|task| serde_json::json!({"deleted": task.id}));
            output::output_mutation(result, || ctx.view_of(&list));
        }
        TaskAction::Reorder { list, from, to } => {
            let result = ctx
                .store_mut()
                .reorder_task(&list, from, to)
                .map(|()| serde_json::json!({"from": from, "to": to}));
            output::output_mutation(result, || ctx.view_of(&list));
        }
        TaskAction::Move {
            list,
            id,
            direction,
        } => {
            let result = ctx
                .store_mut()
                .move_task(&list, &id, direction.into())
                .map(|position| serde_json::json!({"id": id, "position": position}));
            output::output_mutation(result, || ctx.view_of(&list));
        }
    }
    Ok(())
}
