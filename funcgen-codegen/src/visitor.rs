//! Property and declaration visitors.
//!
//! A [`DeclarationVisitor`] turns one annotated interface into the text of one
//! function. Parameter lines and body statements are collected in two
//! separate accumulators during a single pass over the properties.

use funcgen_symbols::{ClassKind, Declaration, Property};

use crate::{
    Error, Options, Result,
    builder::CodeBuilder,
    diagnostic::Logger,
    processor::{FUNCTION_ANNOTATION, NAME_ARGUMENT, RETURNS_ANNOTATION},
    render::TypeRenderer,
};

/// Text produced for a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFragments {
    /// Parameter line, e.g. `    name: kotlin.String,\n`.
    pub signature: String,
    /// Body statement, e.g. `    println("$name")\n`.
    pub body: String,
    /// The rendered parameter type, `None` when it could not be resolved.
    pub rendered_type: Option<String>,
}

/// Renders one property as a function parameter.
#[derive(Clone, Copy)]
pub struct PropertyVisitor<'a> {
    renderer: TypeRenderer<'a>,
    options: &'a Options,
}

impl<'a> PropertyVisitor<'a> {
    pub fn new(renderer: TypeRenderer<'a>, options: &'a Options) -> Self {
        Self { renderer, options }
    }

    /// Visit `property` of the declaration named `owner`.
    ///
    /// An unresolvable property type is logged and the parameter is emitted
    /// without a type annotation.
    pub fn visit(
        &self,
        owner: &str,
        property: &Property,
        logger: &mut dyn Logger,
    ) -> PropertyFragments {
        let symbol = format!("{}.{}", owner, property.name);

        let rendered_type = match self.renderer.render_type(
            &property.type_reference,
            self.options.ignore_generic_args,
            &symbol,
            logger,
        ) {
            Ok(rendered) => Some(rendered),
            Err(unresolved) => {
                logger.error(
                    &format!("Invalid property type '{}'", unresolved.name),
                    &symbol,
                );
                None
            }
        };

        let mut signature = CodeBuilder::kotlin();
        signature.push_indent();
        match &rendered_type {
            Some(ty) => signature.push_line(&format!("{}: {},", property.name, ty)),
            None => signature.push_line(&format!("{},", property.name)),
        };

        let mut body = CodeBuilder::kotlin();
        body.push_indent()
            .push_line(&format!("println(\"${}\")", property.name));

        PropertyFragments {
            signature: signature.build(),
            body: body.build(),
            rendered_type,
        }
    }
}

/// Builds the function text for one annotated declaration.
#[derive(Clone, Copy)]
pub struct DeclarationVisitor<'a> {
    properties: PropertyVisitor<'a>,
}

impl<'a> DeclarationVisitor<'a> {
    pub fn new(renderer: TypeRenderer<'a>, options: &'a Options) -> Self {
        Self {
            properties: PropertyVisitor::new(renderer, options),
        }
    }

    /// Generate the function for `declaration`.
    ///
    /// Returns `Ok(None)` when the declaration is skipped (it is not an
    /// interface). The returned text starts with a blank line and ends with
    /// the closing brace line.
    ///
    /// # Errors
    ///
    /// Fails when the `@Function` name argument is missing or when more than
    /// one `@Returns` marker is present.
    pub fn visit(
        &self,
        declaration: &Declaration,
        logger: &mut dyn Logger,
    ) -> Result<Option<String>> {
        let symbol = declaration.qualified_name();

        if declaration.kind != ClassKind::Interface {
            logger.error(
                &format!("Only interfaces can be annotated with @{}", FUNCTION_ANNOTATION),
                &symbol,
            );
            return Ok(None);
        }

        let name = function_name(declaration)?;

        let mut function = CodeBuilder::kotlin();
        function.push_blank();

        if declaration.properties.is_empty() {
            function
                .push_line(&format!("fun {}() {{", name))
                .push_indent()
                .push_line(&format!("println(\"Hello from {}\")", name))
                .push_dedent()
                .push_line("}");
            return Ok(Some(function.build()));
        }

        function.push_line(&format!("fun {}(", name));

        let mut body = CodeBuilder::kotlin();
        body.push_indent();

        let mut return_markers = 0;
        let mut returned: Option<(&Property, Option<String>)> = None;

        for property in &declaration.properties {
            let fragments = self.properties.visit(&symbol, property, logger);
            function.push_raw(&fragments.signature);
            body.push_raw(&fragments.body);

            let markers = property.annotation_count(RETURNS_ANNOTATION);
            if markers > 0 && returned.is_none() {
                returned = Some((property, fragments.rendered_type));
            }
            return_markers += markers;
        }

        if return_markers > 1 {
            return Err(Error::AmbiguousReturn {
                declaration: symbol,
                count: return_markers,
            });
        }

        match returned {
            Some((property, Some(return_type))) => {
                function.push_line(&format!("): {} {{", return_type));
                body.push_line(&format!("return {}", property.name));
            }
            Some((property, None)) => {
                logger.warn(
                    &format!(
                        "Return type of '{}' could not be resolved; generating without a return value",
                        property.name
                    ),
                    &format!("{}.{}", symbol, property.name),
                );
                function.push_line(") {");
            }
            None => {
                function.push_line(") {");
            }
        }

        function.push_raw(body.as_str()).push_line("}");
        Ok(Some(function.build()))
    }
}

/// Read the generated function's name from the `@Function` annotation.
fn function_name(declaration: &Declaration) -> Result<&str> {
    let annotation =
        declaration
            .annotation(FUNCTION_ANNOTATION)
            .ok_or_else(|| Error::MissingAnnotation {
                declaration: declaration.qualified_name(),
                annotation: FUNCTION_ANNOTATION.to_string(),
            })?;

    annotation
        .get(NAME_ARGUMENT)
        .ok_or_else(|| Error::MissingArgument {
            declaration: declaration.qualified_name(),
            annotation: FUNCTION_ANNOTATION.to_string(),
            argument: NAME_ARGUMENT.to_string(),
        })
}
