use super::*;

pub(super) struct GqlObjectRenderer<'a> {
    object_type: &'a ObjectType,
}

impl<'a> GqlObjectRenderer<'a> {
    pub(super) fn new(object_type: &'a ObjectType) -> Self {
        Self { object_type }
    }
}

impl Renderer for GqlObjectRenderer<'_> {
    fn render(&self, ctx: &mut RenderContext) -> String {
        let name = self.object_type.name();

        if ctx.already_rendered(name) {
            return "".into();
        } else {
            // This short circuits recursive processing for fields.
            ctx.mark_as_rendered(name.to_owned())
        }

        let fields = self.object_type.get_fields();
        let mut rendered_fields = Vec::with_capacity(fields.len());

        for field in fields {
            rendered_fields.push(GqlFieldRenderer::new(field).render(ctx))
        }

        let indented: Vec<String> = rendered_fields
            .into_iter()
            .map(|f| format!("{}{}", ctx.indent(), f))
            .collect();

        let rendered = format!("type {} {{\n{}\n}}", name, indented.join("\n"));
        ctx.add_output(rendered.clone());

        rendered
    }
}
