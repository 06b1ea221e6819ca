use crate::cli::ThemeAction;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use todo_domain::Theme;

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    persisted: Option<bool>,
}

pub fn handle(ctx: &mut CliContext, action: ThemeAction) -> anyhow::Result<()> {
    let response = match action {
        ThemeAction::Get => ThemeResponse {
            theme: ctx.theme(),
            persisted: None,
        },
        ThemeAction::Set { theme } => match theme.parse::<Theme>() {
            Ok(theme) => save(ctx, theme),
            Err(e) => output::output_error(&e.to_string()),
        },
        ThemeAction::Toggle => {
            let theme = ctx.theme().toggled();
            save(ctx, theme)
        }
    };
    output::output_success(response);
    Ok(())
}

fn save(ctx: &CliContext, theme: Theme) -> ThemeResponse {
    let persisted = theme.save(ctx.storage());
    if !persisted {
        tracing::warn!(theme = %theme, "Theme preference was not saved");
    }
    ThemeResponse {
        theme,
        persisted: Some(persisted),
    }
}
