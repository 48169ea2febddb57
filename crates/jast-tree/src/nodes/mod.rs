// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node catalogue.
//!
//! Every node variant is declared once, in the table inside
//! `with_node_table!`. The table drives the payload structs, the
//! [`SyntaxKind`] tag, the [`NodeKind`] payload enum, per-variant property
//! tags (`IfStmt::CONDITION`), and the per-variant methods of the visitor
//! traits.

#[macro_use]
mod macros;
pub mod operators;
pub mod traits;

pub use operators::{AssignOperator, BinaryOperator, Modifier, Modifiers, Primitive, UnaryOperator};
pub use traits::{
    Attribute, AstNode, Category, Property, PropertyDescriptor, SlotMut, SlotRef, SlotShape,
};

use crate::arena::{NodeId, NodeListId};

/// Invoke `$callback!` with the full node catalogue.
macro_rules! with_node_table {
    ($callback:ident) => {
        $callback! {
            // ---- compilation units, packages, imports ----

            /// A source file.
            CompilationUnit (compilation_unit) : CompilationUnit {
                package_declaration: opt_node Package,
                imports: list Import,
                types: list Declaration,
            }
            PackageDeclaration (package_declaration) : Package {
                annotations: list Expression,
                name: node Name,
            }
            ImportDeclaration (import_declaration) : Import {
                name: node Name,
                is_static: attr bool,
                is_asterisk: attr bool,
            }

            // ---- names ----

            /// A possibly qualified name such as `java.util.List`.
            Name (name) : Name {
                qualifier: opt_node Name,
                identifier: attr String,
            }
            SimpleName (simple_name) : Name {
                identifier: attr String,
            }

            // ---- declarations ----

            ClassOrInterfaceDeclaration (class_or_interface_declaration) : Declaration {
                modifiers: attr Modifiers,
                annotations: list Expression,
                is_interface: attr bool,
                name: node Name,
                type_parameters: list Type,
                extended_types: list Type,
                implemented_types: list Type,
                members: list Declaration,
            }
            EnumDeclaration (enum_declaration) : Declaration {
                modifiers: attr Modifiers,
                annotations: list Expression,
                name: node Name,
                implemented_types: list Type,
                entries: list Declaration,
                members: list Declaration,
            }
            EnumConstantDeclaration (enum_constant_declaration) : Declaration {
                annotations: list Expression,
                name: node Name,
                arguments: list Expression,
                class_body: list Declaration,
            }
            MethodDeclaration (method_declaration) : Declaration {
                modifiers: attr Modifiers,
                annotations: list Expression,
                type_parameters: list Type,
                ty: node Type,
                name: node Name,
                parameters: list Parameter,
                thrown_exceptions: list Type,
                body: opt_node Statement,
            }
            ConstructorDeclaration (constructor_declaration) : Declaration {
                modifiers: attr Modifiers,
                annotations: list Expression,
                type_parameters: list Type,
                name: node Name,
                parameters: list Parameter,
                thrown_exceptions: list Type,
                body: node Statement,
            }
            FieldDeclaration (field_declaration) : Declaration {
                modifiers: attr Modifiers,
                annotations: list Expression,
                variables: list Variable,
            }
            /// A static or instance initializer block.
            InitializerDeclaration (initializer_declaration) : Declaration {
                is_static: attr bool,
                body: node Statement,
            }
            Parameter (parameter) : Parameter {
                modifiers: attr Modifiers,
                annotations: list Expression,
                ty: node Type,
                is_var_args: attr bool,
                name: node Name,
            }
            VariableDeclarator (variable_declarator) : Variable {
                ty: node Type,
                name: node Name,
                initializer: opt_node Expression,
            }

            // ---- types ----

            TypeParameter (type_parameter) : Type {
                annotations: list Expression,
                name: node Name,
                type_bound: list Type,
            }
            ClassOrInterfaceType (class_or_interface_type) : Type {
                annotations: list Expression,
                scope: opt_node Type,
                name: node Name,
                type_arguments: opt_list Type,
            }
            PrimitiveType (primitive_type) : Type {
                annotations: list Expression,
                primitive: attr Primitive,
            }
            ArrayType (array_type) : Type {
                annotations: list Expression,
                component_type: node Type,
            }
            VoidType (void_type) : Type {
                annotations: list Expression,
            }
            WildcardType (wildcard_type) : Type {
                annotations: list Expression,
                extended_type: opt_node Type,
                super_type: opt_node Type,
            }
            /// Type of a lambda parameter whose type is inferred.
            UnknownType (unknown_type) : Type {}
            VarType (var_type) : Type {
                annotations: list Expression,
            }

            // ---- statements ----

            BlockStmt (block_stmt) : Statement {
                statements: list Statement,
            }
            ExpressionStmt (expression_stmt) : Statement {
                expression: node Expression,
            }
            ReturnStmt (return_stmt) : Statement {
                expression: opt_node Expression,
            }
            IfStmt (if_stmt) : Statement {
                condition: node Expression,
                then_stmt: node Statement,
                else_stmt: opt_node Statement,
            }
            WhileStmt (while_stmt) : Statement {
                condition: node Expression,
                body: node Statement,
            }
            DoStmt (do_stmt) : Statement {
                body: node Statement,
                condition: node Expression,
            }
            ForStmt (for_stmt) : Statement {
                initialization: list Expression,
                compare: opt_node Expression,
                update: list Expression,
                body: node Statement,
            }
            ForEachStmt (for_each_stmt) : Statement {
                variable: node Expression,
                iterable: node Expression,
                body: node Statement,
            }
            TryStmt (try_stmt) : Statement {
                resources: list Expression,
                try_block: node Statement,
                catch_clauses: list CatchClause,
                finally_block: opt_node Statement,
            }
            CatchClause (catch_clause) : CatchClause {
                parameter: node Parameter,
                body: node Statement,
            }
            ThrowStmt (throw_stmt) : Statement {
                expression: node Expression,
            }
            BreakStmt (break_stmt) : Statement {
                label: opt_node Name,
            }
            ContinueStmt (continue_stmt) : Statement {
                label: opt_node Name,
            }
            SwitchStmt (switch_stmt) : Statement {
                selector: node Expression,
                entries: list SwitchEntry,
            }
            /// One `case` or `default` group of a switch.
            SwitchEntry (switch_entry) : SwitchEntry {
                labels: list Expression,
                statements: list Statement,
            }
            LabeledStmt (labeled_stmt) : Statement {
                label: node Name,
                statement: node Statement,
            }
            LocalClassDeclarationStmt (local_class_declaration_stmt) : Statement {
                class_declaration: node Declaration,
            }
            EmptyStmt (empty_stmt) : Statement {}
            /// Placeholder for a statement the parser could not recognize.
            UnparsableStmt (unparsable_stmt) : Statement {}

            // ---- expressions ----

            AssignExpr (assign_expr) : Expression {
                target: node Expression,
                value: node Expression,
                operator: attr AssignOperator,
            }
            BinaryExpr (binary_expr) : Expression {
                left: node Expression,
                right: node Expression,
                operator: attr BinaryOperator,
            }
            UnaryExpr (unary_expr) : Expression {
                expression: node Expression,
                operator: attr UnaryOperator,
            }
            MethodCallExpr (method_call_expr) : Expression {
                scope: opt_node Expression,
                type_arguments: opt_list Type,
                name: node Name,
                arguments: list Expression,
            }
            FieldAccessExpr (field_access_expr) : Expression {
                scope: node Expression,
                type_arguments: opt_list Type,
                name: node Name,
            }
            NameExpr (name_expr) : Expression {
                name: node Name,
            }
            ObjectCreationExpr (object_creation_expr) : Expression {
                scope: opt_node Expression,
                ty: node Type,
                type_arguments: opt_list Type,
                arguments: list Expression,
                anonymous_class_body: opt_list Declaration,
            }
            ConditionalExpr (conditional_expr) : Expression {
                condition: node Expression,
                then_expr: node Expression,
                else_expr: node Expression,
            }
            /// A parenthesized expression.
            EnclosedExpr (enclosed_expr) : Expression {
                inner: node Expression,
            }
            CastExpr (cast_expr) : Expression {
                ty: node Type,
                expression: node Expression,
            }
            InstanceOfExpr (instance_of_expr) : Expression {
                expression: node Expression,
                ty: node Type,
            }
            LambdaExpr (lambda_expr) : Expression {
                parameters: list Parameter,
                body: node Statement,
                is_enclosing_parameters: attr bool,
            }
            MethodReferenceExpr (method_reference_expr) : Expression {
                scope: node Expression,
                type_arguments: opt_list Type,
                identifier: attr String,
            }
            ArrayAccessExpr (array_access_expr) : Expression {
                name: node Expression,
                index: node Expression,
            }
            ArrayInitializerExpr (array_initializer_expr) : Expression {
                values: list Expression,
            }
            VariableDeclarationExpr (variable_declaration_expr) : Expression {
                modifiers: attr Modifiers,
                annotations: list Expression,
                variables: list Variable,
            }
            ThisExpr (this_expr) : Expression {
                type_name: opt_node Name,
            }
            SuperExpr (super_expr) : Expression {
                type_name: opt_node Name,
            }
            ClassExpr (class_expr) : Expression {
                ty: node Type,
            }

            // ---- literals ----

            IntegerLiteralExpr (integer_literal_expr) : Expression {
                value: attr String,
            }
            LongLiteralExpr (long_literal_expr) : Expression {
                value: attr String,
            }
            DoubleLiteralExpr (double_literal_expr) : Expression {
                value: attr String,
            }
            CharLiteralExpr (char_literal_expr) : Expression {
                value: attr String,
            }
            StringLiteralExpr (string_literal_expr) : Expression {
                value: attr String,
            }
            BooleanLiteralExpr (boolean_literal_expr) : Expression {
                value: attr bool,
            }
            NullLiteralExpr (null_literal_expr) : Expression {}

            // ---- annotations ----

            MarkerAnnotationExpr (marker_annotation_expr) : Expression {
                name: node Name,
            }
            SingleMemberAnnotationExpr (single_member_annotation_expr) : Expression {
                name: node Name,
                member_value: node Expression,
            }
            NormalAnnotationExpr (normal_annotation_expr) : Expression {
                name: node Name,
                pairs: list MemberValuePair,
            }
            MemberValuePair (member_value_pair) : MemberValuePair {
                name: node Name,
                value: node Expression,
            }

            // ---- comments ----

            LineComment (line_comment) : Comment {
                content: attr String,
            }
            BlockComment (block_comment) : Comment {
                content: attr String,
            }
            JavadocComment (javadoc_comment) : Comment {
                content: attr String,
            }
        }
    };
}

with_node_table!(define_nodes);

impl SyntaxKind {
    /// Look up the descriptor of a declared property.
    pub fn property(self, property: Property) -> Option<&'static PropertyDescriptor> {
        self.properties().iter().find(|d| d.property == property)
    }

    pub fn is_comment(self) -> bool {
        self.category() == Category::Comment
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl NodeKind {
    pub fn category(&self) -> Category {
        self.syntax_kind().category()
    }

    /// Typed view of the payload.
    pub fn cast<T: AstNode>(&self) -> Option<&T> {
        T::cast(self)
    }
}
