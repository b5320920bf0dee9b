use super::*;
use entity_value::EntityValue;
use itertools::Itertools;

pub(super) struct GqlFieldRenderer<'a> {
    field: &'a OutputField,
}

impl<'a> GqlFieldRenderer<'a> {
    pub(super) fn new(field: &'a OutputField) -> Self {
        Self { field }
    }
}

impl Renderer for GqlFieldRenderer<'_> {
    fn render(&self, ctx: &mut RenderContext) -> String {
        let rendered_args: Vec<String> = self
            .field
            .arguments
            .iter()
            .map(|arg| render_argument(arg, ctx))
            .collect();

        let rendered_args = if rendered_args.is_empty() {
            "".into()
        } else if rendered_args.len() > 1 {
            // Multiline - double indent.
            format!(
                "({}\n{})",
                rendered_args
                    .into_iter()
                    .map(|arg| format!("\n{}{}", ctx.indent().repeat(2), arg))
                    .join(""),
                ctx.indent()
            )
        } else {
            // Single line
            format!("({})", rendered_args.join(", "))
        };

        let rendered_type = GqlTypeRenderer::Output(&self.field.field_type).render(ctx);
        format!("{}{}: {}", self.field.name, rendered_args, rendered_type)
    }
}

fn render_argument(arg: &InputField, ctx: &mut RenderContext) -> String {
    let rendered_type = GqlTypeRenderer::Input(&arg.field_type).render(ctx);

    match &arg.default_value {
        Some(default) => format!("{}: {} = {}", arg.name, rendered_type, render_default(default)),
        None => format!("{}: {}", arg.name, rendered_type),
    }
}

fn render_default(value: &EntityValue) -> String {
    match value {
        EntityValue::String(s) => format!("{s:?}"),
        other => other.to_string(),
    }
}
