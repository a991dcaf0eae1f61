/*!

# patscan - editor pattern matching over buffers and strings

This crate provides the pattern-matching engine of a text editor's search and
replace commands. A pattern is compiled once and then scanned forward or
backward over a flat string or over a line-oriented buffer, starting from any
position, optionally wrapping around at the end.

Patterns are 8-bit: every character code is a single byte and no Unicode
semantics apply. Plain-text bodies are served by a delta-table (Boyer-Moore
style) search; bodies with metacharacters run a classical backtracking
element matcher.

# Example: test if a string contains a match

```rust
use patscan::Pattern;
let p = Pattern::new(r"\d{4}").unwrap();
let matched = p.find("2020-20-05").is_some();
assert!(matched);
```

# Example: iterating over matches

```rust
use patscan::Pattern;
let p = Pattern::new(r"\w+").unwrap();
let text = "pick up the pieces";
for m in p.find_iter(text) {
    println!("{}", &text[m.range()])
}
// Output: pick
// Output: up
// Output: the
// Output: pieces
```

# Example: using capture groups

Capture groups are available in the `Match` object produced by a successful
match. A capture group is a range of byte indexes into the original string.

```rust
use patscan::Pattern;
let p = Pattern::new(r"(\d{4})").unwrap();
let text = "Today is 2020-20-05";
let m = p.find(text).unwrap();
let group = m.group(1).unwrap();
println!("Year: {}", &text[group]);
// Output: Year: 2020
```

# Example: option suffixes

A pattern specification may end in a colon followed by option letters, the way
an editor's search prompt accepts them. 'i' folds case, 'm' makes ^ and $
match at line separators, 'p' turns off metacharacters, 'e' and 'r' force
exact case and metacharacter interpretation where an application defaults
otherwise.

```rust
use patscan::Pattern;
let p = Pattern::new("readme:i").unwrap();
assert!(p.find("see the README file").is_some());
```

# Example: scanning a buffer

Buffers are sequences of lines without stored terminators; a virtual newline
separates consecutive lines, and positions are line/offset pairs.

```rust
use patscan::{BufPos, Pattern, ScanDirection, WordTable};
let lines = vec!["first line", "second line"];
let p = Pattern::new("second").unwrap();
let word = WordTable::default();
let m = p
    .scan_buffer(&lines, BufPos::new(0, 0), ScanDirection::Forward, 1, &word)
    .unwrap();
assert_eq!(m.start, BufPos::new(1, 0));
```

Buffer scans wrap around: a search started mid-buffer continues from the
opposite end after reaching the boundary, and gives up only upon returning to
its origin.

# Supported syntax

`. * + ? {m} {m,} {m,n} ( ) [ ] ^ $` plus the escapes `\d \D \s \S \w \W \l
\L \b \B \A \z \Z \t \r \n \f`. Quantifiers take a trailing `?` for lazy
matching. There are no alternations, backreferences or lookaround
assertions; a quantifier may not apply to a group.

# Comparison to regex crates

This engine trades generality for the behaviors editors need: bidirectional
scans from arbitrary positions, wrap-around, a configurable word-character
table, and retention of matched text for replacement commands. Matching is
classical backtracking with no linear-time guarantee.

*/

#![warn(clippy::all)]
#![allow(clippy::match_like_matches_macro)]
// Clippy's manual_range_contains suggestion produces worse codegen.
#![allow(clippy::manual_range_contains)]

pub use crate::api::*;
pub use crate::groups::SavedMatch;
pub use crate::history::PatternHistory;
pub use crate::indexing::{BufInput, BufPos, Buffer, StrInput, TextInput};
pub use crate::wordtable::WordTable;

#[macro_use]
mod util;

mod api;
mod backtrack;
mod bitset;
mod bytesearch;
mod classes;
mod compile;
mod cursor;
mod groups;
mod history;
mod indexing;
mod matchers;
mod meta;
mod wordtable;
