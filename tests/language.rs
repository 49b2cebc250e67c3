use dotpipe::sink::SharedSink;
use dotpipe::native::Native;
use dotpipe::{compile, run_with, CallError, Context, Error, Evaluator, Object, Options};
use pretty_assertions::assert_eq;

fn evaluator_with_input(input: &'static str) -> (Evaluator, SharedSink) {
  let sink = SharedSink::new();
  let context = Context::new(Box::new(sink.clone()), Box::new(input.as_bytes()), Some(7));
  (Evaluator::with_context(context), sink)
}

fn evaluator() -> (Evaluator, SharedSink) {
  evaluator_with_input("")
}

fn eval(source: &str) -> Result<Object, Error> {
  evaluator().0.run(source)
}

#[test]
fn adds_two_numbers() {
  assert_eq!(eval("|add:5:3").unwrap(), Object::Integer(8));
}

#[test]
fn variables_feed_a_call() {
  let (mut evaluator, _) = evaluator();
  evaluator.run("&x:42\n&y:8\n&sum:|add:!x:!y").unwrap();
  assert_eq!(evaluator.get_var("sum"), Some(Object::Integer(50)));
}

#[test]
fn uppercases_a_string() {
  assert_eq!(eval("|uppercase:\"hello\"").unwrap(), Object::string("HELLO"));
}

#[test]
fn unknown_function_is_a_name_resolution_error() {
  let err = eval("|frobnicate:1").unwrap_err();
  assert_eq!(err.kind(), "NameResolution");
  assert_eq!(err.to_string(), "function not found: frobnicate");
}

#[test]
fn replaces_inside_a_bound_string() {
  let result = eval("&text:\"hello world\"\n|replace:!text:\"world\":\"dotlang\"").unwrap();
  assert_eq!(result, Object::string("hello dotlang"));
}

#[test]
fn undefined_variable_is_null() {
  assert_eq!(eval("!undefinedvar").unwrap(), Object::Null);
}

#[test]
fn assignment_round_trip() {
  for (source, expected) in [
    ("&v:1\n!v", Object::Integer(1)),
    ("&v:2.5\n!v", Object::Float(2.5)),
    ("&v:\"s\"\n!v", Object::string("s")),
    ("&v:true\n!v", Object::Boolean(true)),
    ("&v:null\n!v", Object::Null),
    ("&v:-4\n!v", Object::Integer(-4)),
  ] {
    assert_eq!(eval(source).unwrap(), expected, "{}", source);
  }
}

#[test]
fn print_writes_to_the_context_sink() {
  let (mut evaluator, sink) = evaluator();
  let result = evaluator.run("|print:\"a\":1:true\n&xs:|split:\"x,y\":\",\"\n|print:!xs").unwrap();
  assert_eq!(result, Object::Null);
  assert_eq!(sink.contents(), "a 1 true\n[\"x\", \"y\"]\n");
}

#[test]
fn input_reads_lines_from_the_context() {
  let (mut evaluator, sink) = evaluator_with_input("Ada\n");
  let result = evaluator.run("&name:|input:\"name? \"\n|concat:\"hi \":!name").unwrap();
  assert_eq!(result, Object::string("hi Ada"));
  assert_eq!(sink.contents(), "name? ");
  assert_eq!(evaluator.run("|input").unwrap(), Object::Null);
}

#[test]
fn bindings_persist_across_runs() {
  let (mut evaluator, _) = evaluator();
  evaluator.run("&count:1").unwrap();
  evaluator.run("&count:|add:!count:1").unwrap();
  assert_eq!(evaluator.run("!count").unwrap(), Object::Integer(2));
}

#[test]
fn a_failed_run_keeps_the_session() {
  let (mut evaluator, _) = evaluator();
  evaluator.run("&x:1").unwrap();
  assert!(evaluator.run("|sqrt:-1").is_err());
  assert_eq!(evaluator.run("!x").unwrap(), Object::Integer(1));
}

#[test]
fn a_pipe_ends_the_previous_call() {
  let (mut evaluator, sink) = evaluator();
  let result = evaluator.run("|print:1 |print:2 |add:1:2").unwrap();
  assert_eq!(result, Object::Integer(3));
  assert_eq!(sink.contents(), "1\n2\n");
}

#[test]
fn results_chain_through_bindings() {
  let source = "&parts:|split:\"a-b-c\":\"-\"\n&parts:|reverse:!parts\n|join:!parts:\"+\"";
  assert_eq!(eval(source).unwrap(), Object::string("c+b+a"));
}

#[test]
fn arrays_are_shared_references() {
  let (mut evaluator, _) = evaluator();
  let result = evaluator
    .run("&xs:|split:\"1 2\":\" \"\n&ys:!xs\n|push:!ys:\"3\"\n|length:!xs")
    .unwrap();
  assert_eq!(result, Object::Integer(3));
  assert_eq!(evaluator.run("|pop:!xs").unwrap(), Object::string("3"));
}

#[test]
fn an_array_holding_itself_still_prints() {
  let (mut evaluator, sink) = evaluator();
  evaluator.run("&xs:|split:\"a\":\",\"\n|push:!xs:!xs\n|print:!xs").unwrap();
  assert_eq!(sink.contents(), "[\"a\", [...]]\n");
  assert_eq!(evaluator.run("|eq:!xs:!xs").unwrap(), Object::Boolean(true));
  assert_eq!(evaluator.run("|tostring:!xs").unwrap(), Object::string("[\"a\", [...]]"));
}

#[test]
fn a_map_can_key_itself() {
  let (mut evaluator, _) = evaluator();
  evaluator.set_var("m", Object::map(Default::default()));
  evaluator.run("|set:!m:!m:1").unwrap();
  assert_eq!(evaluator.run("|keys:!m").unwrap().to_string(), "[\"{}\"]");
}

#[test]
fn conditionals_pick_a_value() {
  assert_eq!(eval("&big:|gt:3:2\n|if:!big:\"big\":\"small\"").unwrap(), Object::string("big"));
  assert_eq!(eval("&same:|eq:1:2\n|if:!same:\"same\"").unwrap(), Object::Null);
}

#[test]
fn host_callables_drive_iteration() {
  let (mut evaluator, _) = evaluator();
  let inc = Native::host("inc", |_, args| match args.as_slice() {
    [Object::Integer(n)] => Ok(Object::Integer(n + 1)),
    [other] => Err(CallError::type_mismatch("int", other)),
    _ => Err(CallError::Value("inc takes one argument".to_owned())),
  });
  evaluator.set_var("inc", Object::Native(inc));
  evaluator.set_var("nums", Object::array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]));

  assert_eq!(evaluator.run("|map:!nums:!inc").unwrap().to_string(), "[2, 3, 4]");
  assert_eq!(evaluator.run("|for:!nums:!inc").unwrap().to_string(), "[2, 3, 4]");

  let err = evaluator.run("&words:|split:\"a b\":\" \"\n|map:!words:!inc").unwrap_err();
  assert!(matches!(err, Error::InvocationType { ref name, .. } if name == "map"), "{:?}", err);
}

#[test]
fn host_functions_are_called_by_name() {
  let (mut evaluator, _) = evaluator();
  evaluator.define_function("square", |_, args| match args.as_slice() {
    [Object::Integer(n)] => Ok(Object::Integer(n * n)),
    _ => Err(CallError::Value("square takes one int".to_owned())),
  });
  assert_eq!(evaluator.run("|square:7").unwrap(), Object::Integer(49));
  assert_eq!(evaluator.run("|square").unwrap_err().kind(), "InvocationType");
}

#[test]
fn while_rejects_a_constant_true_condition() {
  let err = eval("|while:true:1").unwrap_err();
  assert!(err.to_string().starts_with("error calling while:"), "{}", err);
  assert_eq!(eval("|while:false:1").unwrap(), Object::Null);
}

#[test]
fn type_conversions() {
  assert_eq!(eval("&n:|tonumber:\"42\"\n|typeof:!n").unwrap(), Object::string("float"));
  assert_eq!(eval("&n:|add:1:2\n|tostring:!n").unwrap(), Object::string("3"));
  assert_eq!(eval("|isnull:!nothing").unwrap(), Object::Boolean(true));
  assert_eq!(eval("|tobool:\"\"").unwrap(), Object::Boolean(false));
}

#[test]
fn seeded_random_is_reproducible() {
  let options = Options::default().with_seed(42);
  let first = run_with("|random:1:100", &options).unwrap();
  let second = run_with("|random:1:100", &options).unwrap();
  assert_eq!(first, second);
}

#[test]
fn strict_mode_rejects_recovered_input() {
  let err = run_with("|print:\"unterminated", &Options::strict()).unwrap_err();
  assert_eq!(err.kind(), "Syntax");
  assert!(err.to_string().starts_with("1:8:"), "{}", err);

  assert!(compile("&x:1\n!x", &Options::strict()).is_ok());
}

#[test]
fn lenient_mode_repairs_input() {
  assert_eq!(eval("&:5").unwrap(), Object::Integer(5));
  assert_eq!(eval("1.2.3").unwrap(), Object::Null);
}
