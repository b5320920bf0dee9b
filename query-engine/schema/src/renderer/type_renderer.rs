use super::*;

pub(super) enum GqlTypeRenderer<'a> {
    Input(&'a InputType),
    Output(&'a OutputType),
}

impl Renderer for GqlTypeRenderer<'_> {
    fn render(&self, ctx: &mut RenderContext) -> String {
        match self {
            GqlTypeRenderer::Input(i) => i.to_string(),
            GqlTypeRenderer::Output(o) => self.render_output_type(o, ctx),
        }
    }
}

impl GqlTypeRenderer<'_> {
    fn render_output_type(&self, o: &OutputType, ctx: &mut RenderContext) -> String {
        match o {
            OutputType::Object(obj) => {
                let obj = obj.into_arc();
                let _ = GqlObjectRenderer::new(&obj).render(ctx);
                obj.name().to_owned()
            }

            OutputType::Enum(et) => {
                let _ = GqlEnumRenderer::new(et).render(ctx);
                et.name().to_owned()
            }

            OutputType::List(l) => format!("[{}]", self.render_output_type(l, ctx)),
            OutputType::NonNull(inner) => format!("{}!", self.render_output_type(inner, ctx)),
            OutputType::Scalar(scalar) => scalar.name().to_owned(),
        }
    }
}
