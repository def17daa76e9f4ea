mod common;
mod routing;
mod rules;
