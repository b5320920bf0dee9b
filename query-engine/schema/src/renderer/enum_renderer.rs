use super::*;

pub(super) struct GqlEnumRenderer<'a> {
    enum_type: &'a EnumType,
}

impl<'a> GqlEnumRenderer<'a> {
    pub(super) fn new(enum_type: &'a EnumType) -> Self {
        Self { enum_type }
    }
}

impl Renderer for GqlEnumRenderer<'_> {
    fn render(&self, ctx: &mut RenderContext) -> String {
        let name = self.enum_type.name();

        if ctx.already_rendered(name) {
            return "".into();
        }

        let values: Vec<String> = self
            .enum_type
            .values()
            .iter()
            .map(|v| format!("{}{}", ctx.indent(), v))
            .collect();

        let rendered = format!("enum {} {{\n{}\n}}", name, values.join("\n"));

        ctx.mark_as_rendered(name.to_owned());
        ctx.add_output(rendered.clone());

        rendered
    }
}
