use core::panic;

use argschema_parser::Args;

fn main() {
    let argv = &["-lp", "8080", "-d", "/tmp", "-d", "/var", "-e", "HOME=/root", "file.txt"];

    let args: Args<'_> = match Args::parse("l,p#,d[*],e&", argv) {
        Ok(args) => args,
        Err(err) => panic!("cannot parse arguments: {err}"),
    };

    if !args.has('l') || args.get_bool('l') != Ok(true) {
        panic!("invalid l");
    }

    if args.get_int('p') != Ok(8080) {
        panic!("invalid p");
    }

    if args.get_str_list('d') != Ok(&["/tmp", "/var"][..]) {
        panic!("invalid d");
    }

    let env = args.get_str_map('e').expect("must be a map");
    if env.get("HOME").copied() != Some("/root") {
        panic!("invalid e");
    }

    if args.remaining() != ["file.txt"] {
        panic!("invalid remaining arguments");
    }
}
