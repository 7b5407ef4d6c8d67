//! Standard multiscale rounds: link radius grows from 1 to 14 while the
//! direction and end-projection tolerances tighten; the replace radius grows
//! geometrically and the coverage minimums rise in three steps.
use super::{LinkParams, ReplaceParams};
use crate::bixel::GridMode::Endpoints;

pub(crate) const STANDARD_ROUNDS: usize = 18;

#[rustfmt::skip]
pub(crate) const LINK_ROUNDS: [LinkParams; STANDARD_ROUNDS] = [
    LinkParams::new(Endpoints,  1.0, 0.5, 2.0, 0.785398, 0.60, 2.0),
    LinkParams::new(Endpoints,  1.2, 0.5, 2.0, 0.785398, 0.50, 2.0),
    LinkParams::new(Endpoints,  1.4, 0.5, 2.0, 0.785398, 0.40, 2.0),
    LinkParams::new(Endpoints,  1.6, 0.5, 2.0, 0.698132, 0.35, 2.0),
    LinkParams::new(Endpoints,  1.8, 0.5, 2.0, 0.610865, 0.30, 2.0),
    LinkParams::new(Endpoints,  2.0, 0.5, 2.0, 0.523599, 0.25, 2.0),
    LinkParams::new(Endpoints,  3.0, 0.5, 2.0, 0.436332, 0.20, 2.0),
    LinkParams::new(Endpoints,  4.0, 0.5, 2.0, 0.349066, 0.15, 2.0),
    LinkParams::new(Endpoints,  5.0, 0.5, 2.0, 0.261799, 0.10, 2.0),
    LinkParams::new(Endpoints,  6.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints,  7.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints,  8.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints,  9.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints, 10.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints, 11.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints, 12.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints, 13.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
    LinkParams::new(Endpoints, 14.0, 0.5, 2.0, 0.174533, 0.05, 2.0),
];

#[rustfmt::skip]
pub(crate) const REPLACE_ROUNDS: [ReplaceParams; STANDARD_ROUNDS] = [
    ReplaceParams::new(  1.2, 0.005, true, 0.5, 0.7, 4, true),
    ReplaceParams::new(  1.7, 0.005, true, 0.5, 0.7, 4, true),
    ReplaceParams::new(  2.5, 0.005, true, 0.5, 0.7, 4, true),
    ReplaceParams::new(  4.0, 0.005, true, 0.5, 0.7, 4, true),
    ReplaceParams::new(  6.0, 0.005, true, 0.5, 0.7, 4, true),
    ReplaceParams::new( 10.0, 0.005, true, 0.6, 0.8, 4, true),
    ReplaceParams::new( 16.0, 0.005, true, 0.6, 0.8, 4, true),
    ReplaceParams::new( 24.0, 0.005, true, 0.6, 0.8, 4, true),
    ReplaceParams::new( 36.0, 0.005, true, 0.6, 0.8, 4, true),
    ReplaceParams::new( 54.0, 0.005, true, 0.6, 0.8, 4, true),
    ReplaceParams::new( 81.0, 0.005, true, 0.6, 0.8, 4, true),
    ReplaceParams::new(120.0, 0.005, true, 0.7, 0.9, 4, true),
    ReplaceParams::new(180.0, 0.005, true, 0.7, 0.9, 4, true),
    ReplaceParams::new(270.0, 0.005, true, 0.7, 0.9, 4, true),
    ReplaceParams::new(270.0, 0.005, true, 0.7, 0.9, 4, true),
    ReplaceParams::new(270.0, 0.005, true, 0.7, 0.9, 4, true),
    ReplaceParams::new(270.0, 0.005, true, 0.7, 0.9, 4, true),
    ReplaceParams::new(270.0, 0.005, true, 0.7, 0.9, 4, true),
];
