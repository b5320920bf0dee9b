use indoc::indoc;
use pretty_assertions::assert_eq;
use schema::*;

#[test]
fn cyclic_schema_renders_each_type_once() {
    let schema = EntitySchema::new(vec![
        Entity::new(
            "Account",
            vec![
                Field::scalar("id", ScalarType::String, true),
                Field::derived("tokens", "Token", "owner"),
            ],
        ),
        Entity::new(
            "Token",
            vec![
                Field::scalar("id", ScalarType::BigInt, true),
                Field::relationship("owner", "Account", true),
                Field::enumeration("color", "Color", false),
                Field::list(
                    "tags",
                    ListElement::Scalar {
                        scalar_type_name: ScalarType::String,
                    },
                    true,
                    false,
                ),
            ],
        ),
    ])
    .with_enum("Color", &["RED", "GREEN"])
    .with_enum("Unused", &["A"]);

    let registry = build(schema).unwrap();

    let expected = indoc! {r#"
        enum Color {
          RED
          GREEN
        }

        type Token {
          id: BigInt!
          owner: Account!
          color: Color
          tags: [String!]
        }

        type Account {
          id: String!
          tokens(
            skip: Int = 0
            first: Int = 100
            orderBy: String = "id"
            orderDirection: String = "asc"
            timestamp: Int
          ): [Token!]!
        }

        type Query {
          account(id: String!): Account
          accounts(
            skip: Int = 0
            first: Int = 100
            orderBy: String = "id"
            orderDirection: String = "asc"
            timestamp: Int
          ): [Account!]!
          token(id: String!): Token
          tokens(
            skip: Int = 0
            first: Int = 100
            orderBy: String = "id"
            orderDirection: String = "asc"
            timestamp: Int
          ): [Token!]!
        }

        enum Unused {
          A
        }

        scalar BigInt

        scalar Bytes"#};

    assert_eq!(render_graphql_schema(&registry), expected);
}
