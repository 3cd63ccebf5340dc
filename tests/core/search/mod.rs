//! Search layer tests over indexes produced by the builder.
