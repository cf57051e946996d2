use assert_cmd::Command;

pub const SCENARIO: &str = "\
# comment-unroll template
Hi {Name} = {Value}
# comment-unroll end
# comment-unroll table
Name,Value
a,1
b,2
# comment-unroll end
# comment-unroll unroll
stale body
# comment-unroll end
";

pub const EXPANDED: &str = "\
# comment-unroll template
Hi {Name} = {Value}
# comment-unroll end
# comment-unroll table
Name,Value
a,1
b,2
# comment-unroll end
# comment-unroll unroll
Hi a = 1
Hi b = 2
# comment-unroll end
";

pub fn unroll_cmd() -> Command {
	let mut cmd = Command::cargo_bin("comment-unroll").unwrap_or_else(|e| panic!("binary: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}
