//! CLI parsing tests for get command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_required_arg_test! {
        command: "get",
        test_name: test_requires_row,
        required_arg: "--row",
    }

    crate::cli_option_test! {
        command: "get",
        variant: Get,
        test_name: test_with_row,
        args: ["--row", "user:1", "--column", "email"],
        field: row,
        expected: "user:1",
    }

    crate::cli_option_test! {
        command: "get",
        variant: Get,
        test_name: test_with_short_column,
        args: ["-r", "user:1", "-c", "email"],
        field: column,
        expected: "email",
    }

    crate::cli_error_test! {
        command: "get",
        test_name: test_requires_column,
        args: ["--row", "user:1"],
    }
}
