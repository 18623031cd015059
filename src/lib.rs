// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Gesture-driven card triage with choreographed exit animations.
//!
//! A stack of cards is triaged one at a time: the front card follows the
//! pointer, and a released drag either springs back or commits to one of
//! three actions (archive, journal, delete), each with its own exit
//! choreography. Cards behind the front one slide forward as it leaves, and
//! an undone action plays the card back in.
//!
//! # Key entry points
//!
//! - [`deck::TriageDeck`] - owns every card and advances its animation
//! - [`control::TriageController`] - turns deck events into haptics and
//!   commits on the owner's [`control::TriageHost`]
//! - [`render_loop::RenderLoop`] - ticks a deck on a background thread
//! - [`input::InputProcessor`] - converts raw pointer and key events into
//!   deck commands
//! - [`options::Options`] - thresholds, stack treatment and choreography
//!   geometry, loadable from TOML
//!
//! # Architecture
//!
//! Two contexts share nothing but channels. The render context (the deck)
//! owns all visual state and is the only writer of it; each card has exactly
//! one driver at a time (cascade, gesture or choreography). The control
//! context receives [`deck::ControlEvent`]s, performs side effects, and
//! sends [`deck::DeckCommand`]s back. Frames leave the render thread through
//! a lock-free triple buffer as [`deck::DeckSnapshot`]s.

pub mod animation;
pub mod card;
pub mod choreography;
pub mod control;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod input;
pub mod options;
pub mod render_loop;
pub mod stack;
pub mod util;
