//! Blueprint grammar on top of the tag scanner.
//!
//! ```text
//! file      = object*
//! object    = <object Name="..."> ( component | listen )* </object>
//! component = <component ComponentName="..." key="value"*>
//! listen    = <any-other-tag Name="EVENT_...">
//! ```

use crate::blueprint::{Blueprint, BlueprintComponent};
use crate::error::{ParseError, ParseErrorKind};
use crate::scanner::{RawTag, Scanner};

const OBJECT: &str = "object";
const COMPONENT: &str = "component";
const NAME: &str = "Name";
const COMPONENT_NAME: &str = "ComponentName";

pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    /// Parses every blueprint in `input`, in source order. Any error aborts
    /// the whole parse.
    pub fn parse(input: &'a str) -> Result<Vec<Blueprint>, ParseError> {
        let mut parser = Self {
            scanner: Scanner::new(input),
        };
        parser.parse_file()
    }

    fn parse_file(&mut self) -> Result<Vec<Blueprint>, ParseError> {
        let mut blueprints = Vec::new();
        while let Some(tag) = self.scanner.next_tag()? {
            if tag.closing {
                return Err(error(&tag, ParseErrorKind::UnexpectedClosingTag(tag.name.clone())));
            }
            if tag.name != OBJECT {
                return Err(error(&tag, ParseErrorKind::ExpectedObject(tag.name.clone())));
            }
            blueprints.push(self.parse_object(&tag)?);
        }
        Ok(blueprints)
    }

    fn parse_object(&mut self, open: &RawTag) -> Result<Blueprint, ParseError> {
        let mut blueprint = Blueprint::new(required(open, NAME)?);

        loop {
            let Some(tag) = self.scanner.next_tag()? else {
                return Err(error(open, ParseErrorKind::UnterminatedObject));
            };

            match (tag.closing, tag.name.as_str()) {
                (true, OBJECT) => return Ok(blueprint),
                (true, _) => {
                    return Err(error(&tag, ParseErrorKind::UnexpectedClosingTag(tag.name.clone())));
                }
                (false, OBJECT) => return Err(error(&tag, ParseErrorKind::NestedObject)),
                (false, COMPONENT) => blueprint.components.push(parse_component(&tag)?),
                (false, _) => blueprint
                    .listen_for_events
                    .push(required(&tag, NAME)?.to_string()),
            }
        }
    }
}

fn parse_component(tag: &RawTag) -> Result<BlueprintComponent, ParseError> {
    let mut component = BlueprintComponent::new(required(tag, COMPONENT_NAME)?);
    for (key, value) in &tag.attributes {
        if key != COMPONENT_NAME {
            // Later duplicates win.
            component.arguments.insert(key.clone(), value.clone());
        }
    }
    Ok(component)
}

fn required<'t>(tag: &'t RawTag, attribute: &'static str) -> Result<&'t str, ParseError> {
    tag.attribute(attribute).ok_or_else(|| {
        error(
            tag,
            ParseErrorKind::MissingAttribute {
                tag: tag.name.clone(),
                attribute,
            },
        )
    })
}

fn error(tag: &RawTag, kind: ParseErrorKind) -> ParseError {
    ParseError::new(tag.position, kind)
}
