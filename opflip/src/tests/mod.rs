


// Rewriter tests
mod rewriting;

// Property tests
mod properties;
