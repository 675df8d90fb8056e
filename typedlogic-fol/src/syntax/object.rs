/*! Implements a generic structural representation of the syntax.

Every model value converts to an [`Object`] tagged with its type name: sentences and variables
become `{type: Name, arguments: [...]}` while records (theories, groups and predicate
definitions) become `{type: Name, field: value, ...}` with absent fields omitted.
[`FromObject`] reconstructs values from such objects by their type tag.

Floats that JSON cannot represent (`NaN` and the infinities) become
`{type: Float, arguments: ["NaN"]}`. A variable with constraints takes them as a third
argument, after its domain or `null`. */

use super::{
    Error, GroupType, PredicateDefinition, Sentence, SentenceGroup, Term, Theory, TypeDefinition,
    Value, Variable, Xor,
};
use indexmap::IndexMap;
use serde_json::{Map, Number};

/// Is the generic structural object that model values are converted to.
pub type Object = serde_json::Value;

const TYPE: &str = "type";
const ARGUMENTS: &str = "arguments";

/// Is the trait of model values that can be converted to an [`Object`].
pub trait AsObject {
    fn as_object(&self) -> Object;
}

/// Is the trait of model values that can be reconstructed from an [`Object`].
pub trait FromObject: Sized {
    fn from_object(object: &Object) -> Result<Self, Error>;
}

fn invalid<S: Into<String>>(reason: S) -> Error {
    Error::InvalidObject {
        reason: reason.into(),
    }
}

fn tagged(kind: &str, arguments: Vec<Object>) -> Object {
    let mut map = Map::new();
    map.insert(TYPE.into(), kind.into());
    map.insert(ARGUMENTS.into(), Object::Array(arguments));
    Object::Object(map)
}

fn record(kind: &str) -> Map<String, Object> {
    let mut map = Map::new();
    map.insert(TYPE.into(), kind.into());
    map
}

fn type_tag(object: &Object) -> Result<&str, Error> {
    object
        .get(TYPE)
        .and_then(Object::as_str)
        .ok_or_else(|| invalid(format!("missing type tag in `{}`", object)))
}

fn expect_type(object: &Object, expected: &str) -> Result<(), Error> {
    let tag = type_tag(object)?;
    if tag == expected {
        Ok(())
    } else {
        Err(invalid(format!("expected `{}`, found `{}`", expected, tag)))
    }
}

fn arguments(object: &Object) -> Result<&Vec<Object>, Error> {
    object
        .get(ARGUMENTS)
        .and_then(Object::as_array)
        .ok_or_else(|| invalid(format!("missing arguments in `{}`", object)))
}

// Returns the field `name`, treating null as absent.
fn field<'a>(object: &'a Object, name: &str) -> Option<&'a Object> {
    object.get(name).filter(|v| !v.is_null())
}

fn string(object: &Object) -> Result<String, Error> {
    object
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("expected a string, found `{}`", object)))
}

fn array<'a>(object: Option<&'a Object>, name: &str) -> Result<&'a [Object], Error> {
    match object {
        None => Ok(&[]),
        Some(value) => value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| invalid(format!("field `{}` is not a list", name))),
    }
}

fn list<T: AsObject>(items: &[T]) -> Object {
    Object::Array(items.iter().map(AsObject::as_object).collect())
}

fn list_from<T: FromObject>(items: &[Object]) -> Result<Vec<T>, Error> {
    items.iter().map(T::from_object).collect()
}

impl AsObject for Variable {
    fn as_object(&self) -> Object {
        let mut arguments = vec![Object::from(self.name())];
        match (self.domain(), self.constraints()) {
            (domain, Some(constraints)) => {
                arguments.push(domain.map_or(Object::Null, Object::from));
                arguments.push(constraints.into());
            }
            (Some(domain), None) => arguments.push(domain.into()),
            (None, None) => {}
        }
        tagged("Variable", arguments)
    }
}

impl FromObject for Variable {
    fn from_object(object: &Object) -> Result<Self, Error> {
        expect_type(object, "Variable")?;
        let typed = |name: &Object, domain: &Object| -> Result<Variable, Error> {
            match domain {
                Object::Null => Ok(Variable::new(string(name)?)),
                _ => Ok(Variable::typed(string(name)?, string(domain)?)),
            }
        };
        match arguments(object)?.as_slice() {
            [name] => Ok(Variable::new(string(name)?)),
            [name, domain] => typed(name, domain),
            [name, domain, constraints] => {
                let constraints = array(Some(constraints), "constraints")?
                    .iter()
                    .map(string)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(typed(name, domain)?.with_constraints(constraints))
            }
            _ => Err(invalid(
                "a variable takes a name, an optional domain and optional constraints",
            )),
        }
    }
}

fn float(f: f64) -> Object {
    Number::from_f64(f)
        .map(Object::Number)
        .unwrap_or_else(|| tagged("Float", vec![f.to_string().into()]))
}

fn float_from(object: &Object) -> Result<f64, Error> {
    match arguments(object)?.as_slice() {
        [text] => string(text)?
            .parse()
            .map_err(|_| invalid(format!("`{}` is not a float", text))),
        _ => Err(invalid("a float takes its text")),
    }
}

impl AsObject for Value {
    fn as_object(&self) -> Object {
        match self {
            Self::Var(v) => v.as_object(),
            Self::Str(s) => s.as_str().into(),
            Self::Int(i) => (*i).into(),
            Self::Float(f) => float(*f),
            Self::Bool(b) => (*b).into(),
            Self::Null => Object::Null,
            Self::Term(t) => t.as_object(),
        }
    }
}

impl FromObject for Value {
    fn from_object(object: &Object) -> Result<Self, Error> {
        match object {
            Object::Null => Ok(Self::Null),
            Object::Bool(b) => Ok(Self::Bool(*b)),
            Object::String(s) => Ok(Self::Str(s.clone())),
            Object::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Self::Int(i)),
                (None, Some(f)) => Ok(Self::Float(f)),
                _ => Err(invalid(format!("unsupported number `{}`", n))),
            },
            Object::Object(_) => match type_tag(object)? {
                "Variable" => Variable::from_object(object).map(Self::Var),
                "Term" => Term::from_object(object).map(Self::from),
                "Float" => float_from(object).map(Self::Float),
                tag => Err(invalid(format!("`{}` is not a value", tag))),
            },
            Object::Array(_) => Err(invalid("a list is not a value")),
        }
    }
}

impl AsObject for Term {
    fn as_object(&self) -> Object {
        let mut arguments = vec![Object::from(self.predicate())];
        arguments.extend(self.values().into_iter().map(AsObject::as_object));
        tagged("Term", arguments)
    }
}

impl FromObject for Term {
    fn from_object(object: &Object) -> Result<Self, Error> {
        expect_type(object, "Term")?;
        match arguments(object)?.split_first() {
            Some((predicate, values)) => Ok(Term::new(string(predicate)?, list_from(values)?)),
            None => Err(invalid("a term needs a predicate")),
        }
    }
}

impl AsObject for Sentence {
    fn as_object(&self) -> Object {
        match self {
            Self::Term(this) => this.as_object(),
            Self::Forall(this) => tagged(
                self.kind(),
                vec![list(this.variables()), this.sentence().as_object()],
            ),
            Self::Exists(this) => tagged(
                self.kind(),
                vec![list(this.variables()), this.sentence().as_object()],
            ),
            Self::Extension(this) => this.to_model_object().as_object(),
            _ => tagged(
                self.kind(),
                self.operands().into_iter().map(|s| s.as_object()).collect(),
            ),
        }
    }
}

impl FromObject for Sentence {
    fn from_object(object: &Object) -> Result<Self, Error> {
        let tag = type_tag(object)?;
        if tag == "Term" {
            return Term::from_object(object).map(Self::from);
        }

        let args = arguments(object)?;
        let arity = |expected: usize| -> Result<Vec<Sentence>, Error> {
            if args.len() == expected {
                list_from(args)
            } else {
                Err(invalid(format!(
                    "`{}` takes {} arguments, found {}",
                    tag,
                    expected,
                    args.len()
                )))
            }
        };
        let quantified = || -> Result<(Vec<Variable>, Sentence), Error> {
            match args.as_slice() {
                [variables, sentence] => Ok((
                    list_from(array(Some(variables), "variables")?)?,
                    Sentence::from_object(sentence)?,
                )),
                _ => Err(invalid(format!("`{}` takes variables and a sentence", tag))),
            }
        };

        let sentence = match tag {
            "And" => Self::all(list_from(args)?),
            "Or" => Self::any(list_from(args)?),
            "Xor" => Xor::new(list_from(args)?).into(),
            "ExactlyOne" => Self::exactly_one(list_from(args)?),
            "Not" => Self::not(arity(1)?.remove(0)),
            "NegationAsFailure" => Self::naf(arity(1)?.remove(0)),
            "Implies" | "Implied" | "Iff" => {
                let mut operands = arity(2)?;
                let second = operands.remove(1);
                let first = operands.remove(0);
                match tag {
                    "Implies" => first.implies(second),
                    "Implied" => first.implied_by(second),
                    _ => first.iff(second),
                }
            }
            "Forall" => {
                let (variables, sentence) = quantified()?;
                Self::forall(variables, sentence)
            }
            "Exists" => {
                let (variables, sentence) = quantified()?;
                Self::exists(variables, sentence)
            }
            _ => return Err(invalid(format!("`{}` is not a sentence", tag))),
        };
        Ok(sentence)
    }
}

impl AsObject for PredicateDefinition {
    fn as_object(&self) -> Object {
        let mut map = record("PredicateDefinition");
        map.insert("predicate".into(), self.predicate.as_str().into());
        map.insert(
            "arguments".into(),
            Object::Object(
                self.arguments
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_str().into()))
                    .collect(),
            ),
        );
        if let Some(description) = &self.description {
            map.insert("description".into(), description.as_str().into());
        }
        if let Some(metadata) = &self.metadata {
            map.insert(
                "metadata".into(),
                Object::Object(metadata.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            );
        }
        if let Some(parents) = &self.parents {
            map.insert("parents".into(), parents.clone().into());
        }
        Object::Object(map)
    }
}

impl FromObject for PredicateDefinition {
    fn from_object(object: &Object) -> Result<Self, Error> {
        expect_type(object, "PredicateDefinition")?;
        let predicate = string(
            field(object, "predicate").ok_or_else(|| invalid("missing field `predicate`"))?,
        )?;
        let arguments: IndexMap<String, String> = match field(object, "arguments") {
            None => IndexMap::new(),
            Some(Object::Object(map)) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), string(v)?)))
                .collect::<Result<_, Error>>()?,
            Some(_) => return Err(invalid("field `arguments` is not a map")),
        };
        let description = field(object, "description").map(string).transpose()?;
        let metadata: Option<IndexMap<String, Object>> = match field(object, "metadata") {
            None => None,
            Some(Object::Object(map)) => {
                Some(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            }
            Some(_) => return Err(invalid("field `metadata` is not a map")),
        };
        let parents: Option<Vec<String>> = match field(object, "parents") {
            None => None,
            Some(value) => Some(
                array(Some(value), "parents")?
                    .iter()
                    .map(string)
                    .collect::<Result<_, _>>()?,
            ),
        };
        Ok(Self {
            predicate,
            arguments,
            description,
            metadata,
            parents,
        })
    }
}

impl AsObject for SentenceGroup {
    fn as_object(&self) -> Object {
        let mut map = record("SentenceGroup");
        map.insert("name".into(), self.name.as_str().into());
        if let Some(group_type) = &self.group_type {
            map.insert("group_type".into(), group_type.as_str().into());
        }
        if let Some(docstring) = &self.docstring {
            map.insert("docstring".into(), docstring.as_str().into());
        }
        map.insert("sentences".into(), list(&self.sentences));
        Object::Object(map)
    }
}

impl FromObject for SentenceGroup {
    fn from_object(object: &Object) -> Result<Self, Error> {
        expect_type(object, "SentenceGroup")?;
        let name = string(field(object, "name").ok_or_else(|| invalid("missing field `name`"))?)?;
        let group_type = match field(object, "group_type") {
            None => None,
            Some(value) => {
                let name = string(value)?;
                Some(
                    GroupType::from_name(&name)
                        .ok_or_else(|| invalid(format!("unknown group type `{}`", name)))?,
                )
            }
        };
        Ok(Self {
            name,
            group_type,
            docstring: field(object, "docstring").map(string).transpose()?,
            sentences: list_from(array(field(object, "sentences"), "sentences")?)?,
        })
    }
}

impl AsObject for TypeDefinition {
    fn as_object(&self) -> Object {
        match self {
            Self::Alias(name) => name.as_str().into(),
            Self::Union(types) => list(types),
        }
    }
}

impl FromObject for TypeDefinition {
    fn from_object(object: &Object) -> Result<Self, Error> {
        match object {
            Object::String(name) => Ok(Self::Alias(name.clone())),
            Object::Array(types) => list_from(types).map(Self::Union),
            _ => Err(invalid(format!("`{}` is not a type definition", object))),
        }
    }
}

impl AsObject for Theory {
    fn as_object(&self) -> Object {
        let mut map = record("Theory");
        if let Some(name) = &self.name {
            map.insert("name".into(), name.as_str().into());
        }
        map.insert(
            "constants".into(),
            Object::Object(
                self.constants
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_object()))
                    .collect(),
            ),
        );
        map.insert(
            "type_definitions".into(),
            Object::Object(
                self.type_definitions
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_object()))
                    .collect(),
            ),
        );
        map.insert(
            "predicate_definitions".into(),
            list(&self.predicate_definitions),
        );
        map.insert("sentence_groups".into(), list(&self.sentence_groups));
        map.insert("ground_terms".into(), list(&self.ground_terms));
        Object::Object(map)
    }
}

fn map_from<T: FromObject>(
    object: Option<&Object>,
    name: &str,
) -> Result<IndexMap<String, T>, Error> {
    match object {
        None => Ok(IndexMap::new()),
        Some(Object::Object(map)) => map
            .iter()
            .map(|(k, v)| Ok((k.clone(), T::from_object(v)?)))
            .collect(),
        Some(_) => Err(invalid(format!("field `{}` is not a map", name))),
    }
}

impl FromObject for Theory {
    fn from_object(object: &Object) -> Result<Self, Error> {
        expect_type(object, "Theory")?;
        Ok(Self {
            name: field(object, "name").map(string).transpose()?,
            constants: map_from(field(object, "constants"), "constants")?,
            type_definitions: map_from(field(object, "type_definitions"), "type_definitions")?,
            predicate_definitions: list_from(array(
                field(object, "predicate_definitions"),
                "predicate_definitions",
            )?)?,
            sentence_groups: list_from(array(
                field(object, "sentence_groups"),
                "sentence_groups",
            )?)?,
            ground_terms: list_from(array(field(object, "ground_terms"), "ground_terms")?)?,
        })
    }
}
