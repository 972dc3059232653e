use async_graphql_parser::{types::Directive, Positioned};

pub(super) fn sanitize(directives: &[Positioned<Directive>], rendered: &mut String) {
    for directive in directives {
        let directive = &directive.node;

        rendered.push_str(" @");
        rendered.push_str(directive.name.node.as_str());

        super::value::sanitize_arguments(&directive.arguments, rendered);
    }
}
