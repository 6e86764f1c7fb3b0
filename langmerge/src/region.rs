//! Region handlers and the line scanner that drives them.
//!
//! A *region* is a span of lines in a language file bracketed by
//! `lang.start: [name]` and `lang.end: [name]` markers. While a region is
//! open, every line (markers included) is delivered to the handler registered
//! under `name` instead of the ordinary key/value parser. After all files are
//! parsed, every completed handler gets one chance to transform the rendered
//! output text and one chance to transform the rendered error report, in
//! encounter order.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REGION_START: Regex = Regex::new(r"lang\.start:\s*\[([\w\s]+)\]").unwrap();
    static ref REGION_END: Regex = Regex::new(r"lang\.end:\s*\[([\w\s]+)\]").unwrap();
}

/// Position of a delivered line within its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEvent {
    /// The line that opened the region (the start marker itself).
    Start,
    /// Any line between the markers, including foreign markers.
    Interior,
    /// The line that closed the region (the matching end marker).
    End,
}

/// A resumable line consumer with three distinct phases.
///
/// 1. **Collect**: [`on_line`](Self::on_line) receives every line of the
///    region, from the start marker through the end marker.
/// 2. **Render output**: [`on_render_output`](Self::on_render_output)
///    receives the fully rendered output text once and may replace it.
/// 3. **Render error**: [`on_render_error`](Self::on_render_error) receives
///    the fully rendered report text once and may replace it.
///
/// Returning `None` from either render phase keeps the running text
/// unchanged.
pub trait RegionHandler: Send {
    fn on_line(&mut self, line: &str, event: RegionEvent);

    fn on_render_output(&mut self, _text: &str) -> Option<String> {
        None
    }

    fn on_render_error(&mut self, _text: &str) -> Option<String> {
        None
    }
}

/// Completed handler invocations, in the order their regions closed.
pub type HandlerChain = Vec<Box<dyn RegionHandler>>;

type HandlerFactory = Arc<dyn Fn() -> Box<dyn RegionHandler> + Send + Sync>;

/// Table mapping region names to handler factories.
///
/// Populated once during the single-threaded setup phase; scanners hold a
/// shared reference and instantiate a fresh handler per matched region.
/// There is no removal operation.
#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the built-in handlers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("use without validate", RawBlock::new);
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F, H>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: RegionHandler + 'static,
    {
        self.factories.insert(
            name.into(),
            Arc::new(move || Box::new(factory()) as Box<dyn RegionHandler>),
        );
    }

    /// Looks up the factory registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&HandlerFactory> {
        self.factories.get(name)
    }
}

struct ActiveRegion {
    name: String,
    handler: Box<dyn RegionHandler>,
}

/// Consumes lines one at a time, diverting region spans to their handlers.
///
/// At most one region is active at a time. A start marker seen while a
/// region is open is an ordinary interior line; an end marker whose name
/// does not match the open region is likewise interior. An end marker with
/// no open region never matches the start pattern and falls through to
/// normal parsing. A region still open at end of file is dropped and never
/// joins the completed chain.
pub struct RegionScanner {
    registry: Arc<HandlerRegistry>,
    active: Option<ActiveRegion>,
    completed: HandlerChain,
}

impl RegionScanner {
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            active: None,
            completed: Vec::new(),
        }
    }

    /// Feeds one line to the scanner. Returns `true` when the line was
    /// absorbed by a region (opened one, closed one, or fell inside one);
    /// absorbed lines must not be given to the key/value parser.
    pub fn feed(&mut self, line: &str) -> bool {
        match self.active.take() {
            None => {
                if let Some(caps) = REGION_START.captures(line) {
                    if let Some(factory) = self.registry.lookup(&caps[1]) {
                        let mut handler = factory();
                        handler.on_line(line, RegionEvent::Start);
                        self.active = Some(ActiveRegion {
                            name: caps[1].to_string(),
                            handler,
                        });
                        return true;
                    }
                }
                false
            }
            Some(mut region) => {
                let closes = REGION_END
                    .captures(line)
                    .map_or(false, |caps| caps[1] == *region.name);
                if closes {
                    region.handler.on_line(line, RegionEvent::End);
                    self.completed.push(region.handler);
                } else {
                    region.handler.on_line(line, RegionEvent::Interior);
                    self.active = Some(region);
                }
                true
            }
        }
    }

    /// Consumes the scanner, yielding the completed handler chain.
    pub fn finish(self) -> HandlerChain {
        self.completed
    }
}

/// Threads `text` through every handler's render-output phase, in order.
pub fn apply_output_chain(chain: &mut HandlerChain, text: String) -> String {
    chain
        .iter_mut()
        .fold(text, |txt, handler| handler.on_render_output(&txt).unwrap_or(txt))
}

/// Threads `text` through every handler's render-error phase, in order.
pub fn apply_error_chain(chain: &mut HandlerChain, text: String) -> String {
    chain
        .iter_mut()
        .fold(text, |txt, handler| handler.on_render_error(&txt).unwrap_or(txt))
}

/// Built-in handler registered as `"use without validate"`.
///
/// Buffers the raw region lines and appends them verbatim to the rendered
/// output, letting a language file carry hand-written source that bypasses
/// key/value parsing entirely. The error report passes through untouched.
pub struct RawBlock {
    lines: Vec<String>,
}

impl RawBlock {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }
}

impl Default for RawBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionHandler for RawBlock {
    fn on_line(&mut self, line: &str, _event: RegionEvent) {
        self.lines.push(line.to_string());
    }

    fn on_render_output(&mut self, text: &str) -> Option<String> {
        let mut out = String::from(text);
        out.push_str(&self.lines.join("\n"));
        out.push('\n');
        Some(out)
    }
}
