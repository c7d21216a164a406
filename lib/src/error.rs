use log::warn;
use thiserror::Error;

/// Conditions that abort the conversion of a whole document
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not parse SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("<{element}> points list has an odd number of coordinates ({count})")]
    OddPointCount { element: String, count: usize },
    #[error("<{element}> attribute `{attribute}` is not a number: {value:?}")]
    InvalidNumber {
        element: String,
        attribute: String,
        value: String,
    },
    #[error("could not parse transform {value:?}: {message}")]
    InvalidTransform { value: String, message: String },
    #[error("could not write SVG: {0}")]
    Write(#[from] quick_xml::Error),
    #[error("written SVG is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Recoverable conditions: the conversion continues, possibly with less output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error("<{element}> tag must have either href or xlink:href")]
    MissingHref { element: String },
    #[error("could not find a drawable element referenced by <use> tag: {id:?}")]
    UnresolvedReference { id: String },
    #[error("<use> reference cycle through {id:?}")]
    CyclicReference { id: String },
    #[error("unsupported stroke-linecap {value:?}, using butt")]
    UnsupportedLineCap { value: String },
    #[error("could not parse color {value:?}, opacity ignored")]
    UnparseableColor { value: String },
    #[error("invalid path data, ignoring the rest of the path: {message}")]
    InvalidPathData { message: String },
    #[error("path segment not used: {segment}")]
    UnsupportedSegment { segment: String },
}

impl Warning {
    /// Log this warning and record it in `sink`
    pub(crate) fn report(self, sink: &mut Vec<Warning>) {
        warn!("{self}");
        sink.push(self);
    }
}
