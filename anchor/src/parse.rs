use chumsky::prelude::*;
use itertools::Itertools;

use crate::engine::Shape;
use crate::error::{AnchorError, Result};
use crate::grid::Coord;

fn integer<'a>() -> impl Parser<'a, &'a str, i32, extra::Err<Rich<'a, char>>> {
    just('-')
        .or_not()
        .then(text::int(10))
        .to_slice()
        .try_map(|digits: &str, span| digits.parse::<i32>().map_err(|e| Rich::custom(span, e)))
}

fn coord<'a>() -> impl Parser<'a, &'a str, Coord, extra::Err<Rich<'a, char>>> {
    integer()
        .then_ignore(just(','))
        .then(integer())
        .map(|(x, y)| Coord::new(x, y))
}

/// One shape per line: `name: x,y x,y ...`.
fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Shape>, extra::Err<Rich<'a, char>>> {
    let spaces = just(' ').repeated();

    // Parse coordinate list: "1,2 -3,4"
    let coords = coord()
        .separated_by(just(' ').repeated().at_least(1))
        .allow_trailing()
        .collect::<Vec<Coord>>();

    // Parse line: "ohio: 1,2 -3,4"
    let shape = text::ident()
        .map(ToString::to_string)
        .then_ignore(just(':'))
        .then_ignore(spaces)
        .then(coords)
        .map(|(name, coords)| Shape { name, coords });

    shape
        .separated_by(text::newline().repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect()
}

/// Parses the shape list format read by the `anchor` binary.
#[tracing::instrument(skip_all, fields(bytes = input.len()))]
pub fn parse_shapes(input: &str) -> Result<Vec<Shape>> {
    let shapes = parser().parse(input).into_result().map_err(|errors| {
        AnchorError::Parse(errors.iter().map(ToString::to_string).join("; "))
    })?;
    tracing::debug!(shapes = shapes.len(), "parsed shapes");
    Ok(shapes)
}
