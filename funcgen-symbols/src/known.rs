//! Declarations visible without an import.

/// Packages imported by default, in lookup order.
pub const DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

/// Qualified names of the standard declarations a symbol table starts with.
pub(crate) const STANDARD_DECLARATIONS: &[&str] = &[
    // kotlin
    "kotlin.Any",
    "kotlin.Annotation",
    "kotlin.Array",
    "kotlin.Boolean",
    "kotlin.BooleanArray",
    "kotlin.Byte",
    "kotlin.ByteArray",
    "kotlin.Char",
    "kotlin.CharArray",
    "kotlin.CharSequence",
    "kotlin.Comparable",
    "kotlin.Double",
    "kotlin.DoubleArray",
    "kotlin.Enum",
    "kotlin.Error",
    "kotlin.Exception",
    "kotlin.Float",
    "kotlin.FloatArray",
    "kotlin.Function",
    "kotlin.Int",
    "kotlin.IntArray",
    "kotlin.Lazy",
    "kotlin.Long",
    "kotlin.LongArray",
    "kotlin.Nothing",
    "kotlin.Number",
    "kotlin.Pair",
    "kotlin.Result",
    "kotlin.Short",
    "kotlin.ShortArray",
    "kotlin.String",
    "kotlin.Throwable",
    "kotlin.Triple",
    "kotlin.UByte",
    "kotlin.UInt",
    "kotlin.ULong",
    "kotlin.UShort",
    "kotlin.Unit",
    // kotlin.collections
    "kotlin.collections.ArrayList",
    "kotlin.collections.Collection",
    "kotlin.collections.HashMap",
    "kotlin.collections.HashSet",
    "kotlin.collections.Iterable",
    "kotlin.collections.Iterator",
    "kotlin.collections.LinkedHashMap",
    "kotlin.collections.LinkedHashSet",
    "kotlin.collections.List",
    "kotlin.collections.ListIterator",
    "kotlin.collections.Map",
    "kotlin.collections.MutableCollection",
    "kotlin.collections.MutableIterable",
    "kotlin.collections.MutableList",
    "kotlin.collections.MutableMap",
    "kotlin.collections.MutableSet",
    "kotlin.collections.Set",
    // kotlin.comparisons
    "kotlin.comparisons.Comparator",
    // kotlin.ranges
    "kotlin.ranges.CharRange",
    "kotlin.ranges.ClosedRange",
    "kotlin.ranges.IntRange",
    "kotlin.ranges.LongRange",
    // kotlin.sequences
    "kotlin.sequences.Sequence",
    // kotlin.text
    "kotlin.text.Appendable",
    "kotlin.text.Regex",
    "kotlin.text.StringBuilder",
];
