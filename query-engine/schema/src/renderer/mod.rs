//! GraphQL SDL rendering of a compiled registry.

mod enum_renderer;
mod field_renderer;
mod object_renderer;
mod type_renderer;

use crate::*;
use enum_renderer::*;
use field_renderer::*;
use object_renderer::*;
use std::collections::HashSet;
use type_renderer::*;

/// Renders every type reachable from the root query, followed by enums nothing
/// references and the custom scalars. Referenced types are emitted before the
/// types that reference them, so `Query` comes last among the object types.
pub fn render_graphql_schema(registry: &TypeRegistry) -> String {
    let mut context = RenderContext::new();

    GqlObjectRenderer::new(registry.query()).render(&mut context);

    for object_type in registry.object_types() {
        GqlObjectRenderer::new(object_type).render(&mut context);
    }

    for enum_type in registry.enum_types() {
        GqlEnumRenderer::new(enum_type).render(&mut context);
    }

    for scalar in [ScalarType::BigInt, ScalarType::Bytes] {
        context.add_output(format!("scalar {scalar}"));
    }

    context.format()
}

trait Renderer {
    fn render(&self, ctx: &mut RenderContext) -> String;
}

struct RenderContext {
    /// Output queue for all (top level) elements that need to be rendered,
    output_queue: Vec<String>,

    /// Prevents double rendering of elements that are referenced multiple times.
    rendered: HashSet<String>,

    /// General indent level in spaces.
    indent: usize,
}

impl RenderContext {
    fn new() -> Self {
        RenderContext {
            output_queue: Default::default(),
            rendered: Default::default(),
            indent: 2,
        }
    }

    fn format(self) -> String {
        self.output_queue.join("\n\n")
    }

    fn already_rendered(&self, cache_key: &str) -> bool {
        self.rendered.contains(cache_key)
    }

    fn mark_as_rendered(&mut self, cache_key: String) {
        self.rendered.insert(cache_key);
    }

    fn add_output(&mut self, output: String) {
        self.output_queue.push(output);
    }

    fn indent(&self) -> String {
        " ".repeat(self.indent)
    }
}
