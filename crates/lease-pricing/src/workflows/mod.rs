pub mod comps;
pub mod pricing;
